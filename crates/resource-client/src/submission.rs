// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Raw outcome of a prediction submission

/// What the service answered to a submission
///
/// On success the service points at the created dataset through the `Location`
/// header; on failure it usually returns an error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResponse {
    status: u16,
    location: Option<String>,
    body: Option<Vec<u8>>,
}

impl SubmissionResponse {
    /// Build a response from its parts
    pub fn new(status: u16, location: Option<String>, body: Option<Vec<u8>>) -> Self {
        Self {
            status,
            location,
            body: body.filter(|b| !b.is_empty()),
        }
    }

    /// A successful submission pointing at the created dataset
    pub fn accepted(status: u16, location: impl Into<String>) -> Self {
        Self::new(status, Some(location.into()), None)
    }

    /// A rejected submission with the service's error body
    pub fn rejected(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self::new(status, None, Some(body.into()))
    }

    /// HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Value of the `Location` header
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Raw response body, `None` when empty
    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }
}

use std::borrow::Cow;

/// Brevo status codes with a fixed, user-presentable message.
pub const STATUS_MESSAGES: &[(u16, &str)] = &[
    (400, "Bad request - validation error"),
    (401, "Invalid API key"),
    (403, "Insufficient API key permissions"),
    (429, "Rate limit exceeded"),
    (500, "Brevo server error"),
    (503, "Brevo service unavailable"),
];

/// Maps a non-success HTTP status to its message, falling back to `API error: <status>`.
pub fn status_message(status: u16) -> Cow<'static, str> {
    STATUS_MESSAGES
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, message)| Cow::Borrowed(*message))
        .unwrap_or_else(|| Cow::Owned(format!("API error: {status}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mapped_statuses_use_table_messages() {
        assert_eq!(status_message(401), "Invalid API key");
        assert_eq!(status_message(503), "Brevo service unavailable");
    }

    #[test]
    fn unmapped_status_falls_back_to_generic_message() {
        assert_eq!(status_message(418), "API error: 418");
        assert_eq!(status_message(502), "API error: 502");
    }

    #[test]
    fn table_has_no_duplicate_codes() {
        let mut codes: Vec<u16> = STATUS_MESSAGES.iter().map(|(code, _)| *code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), STATUS_MESSAGES.len());
    }
}

//! Status Select Colours

pub const STATUS_OK: &str = "ok";
pub const STATUS_NOT_OK: &str = "notok";

/// Text colour of a `.status-select` for its current value
pub fn status_color(value: &str) -> &'static str {
    match value {
        STATUS_NOT_OK => "red",
        STATUS_OK => "green",
        _ => "black",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color("ok"), "green");
        assert_eq!(status_color("notok"), "red");
        assert_eq!(status_color(""), "black");
        assert_eq!(status_color("OK"), "black");
    }
}

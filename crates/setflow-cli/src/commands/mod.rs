pub mod config;
pub mod plan;
pub mod play;

/// mm:ss formatting shared by plan and player output.
pub(crate) fn format_mmss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::format_mmss;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(80), "01:20");
        assert_eq!(format_mmss(600), "10:00");
    }
}

use gamerec_core::format::OutputFormat;
use gamerec_core::similarity::Metric;

/// Parse output format from string
pub fn parse_format(s: &str) -> std::result::Result<OutputFormat, String> {
    s.parse::<OutputFormat>().map_err(|e| e.to_string())
}

/// Parse similarity metric from string
pub fn parse_metric(s: &str) -> std::result::Result<Metric, String> {
    s.parse::<Metric>().map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_metric() {
        assert_eq!(parse_metric("cosine"), Ok(Metric::Cosine));
        assert!(parse_metric("manhattan")
            .unwrap_err()
            .contains("expected cosine or jaccard"));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(parse_format("records"), Ok(OutputFormat::Records));
        assert!(parse_format("yaml").is_err());
    }
}

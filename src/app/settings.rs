use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Boardmap - An interactive map for locating New York City community board districts
pub struct Settings {
    /// Path to the community district boundaries GeoJSON file
    #[clap(long, default_value = "data/districts.json")]
    pub districts: PathBuf,

    /// Disable camera animations (framing commands move the camera instantly)
    #[clap(long)]
    pub no_animate: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::parse_from(["boardmap"]);
        assert_eq!(settings.districts, PathBuf::from("data/districts.json"));
        assert!(!settings.no_animate);
    }

    #[test]
    fn test_overrides() {
        let settings =
            Settings::parse_from(["boardmap", "--districts", "/tmp/cb.json", "--no-animate"]);
        assert_eq!(settings.districts, PathBuf::from("/tmp/cb.json"));
        assert!(settings.no_animate);
    }
}

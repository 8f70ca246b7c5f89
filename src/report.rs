use crate::stats::ImageStats;
use std::fmt;

/// The stdout summary printed for each image.
#[derive(Debug, Clone)]
pub struct ImageReport {
    pub name: String,
    pub width: u32,
    pub height: u32,
    pub stats: ImageStats,
    pub resized_to: Option<(u32, u32)>,
    pub coverage: Vec<(String, f64)>,
}

impl fmt::Display for ImageReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.name)?;
        writeln!(
            f,
            "  Dimensions: {} pixels, {} lines, 3 channels.",
            self.width, self.height
        )?;
        writeln!(f, "  Range: {} to {}", self.stats.min, self.stats.max)?;
        writeln!(f, "  Mean: {:.2} (direct summation)", self.stats.mean_direct)?;
        writeln!(f, "  Mean: {:.2} (channel histogram)", self.stats.mean_histogram)?;
        writeln!(f, "  Standard deviation: {:.2}", self.stats.std_dev)?;

        if let Some((width, height)) = self.resized_to {
            writeln!(f, "  [re-sizing to {} x {} pixels for display]", width, height)?;
        }

        if !self.coverage.is_empty() {
            let parts: Vec<String> = self
                .coverage
                .iter()
                .map(|(band, fraction)| format!("{} {:.1}%", band, fraction * 100.0))
                .collect();
            writeln!(f, "  Band coverage: {}", parts.join(", "))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ImageReport {
        ImageReport {
            name: "sky.jpg".to_string(),
            width: 1024,
            height: 768,
            stats: ImageStats {
                min: 3,
                max: 250,
                mean_direct: 117.456,
                mean_histogram: 117.456,
                std_dev: 40.1234,
            },
            resized_to: None,
            coverage: vec![
                ("dark".to_string(), 0.125),
                ("medium".to_string(), 0.0),
                ("light".to_string(), 0.5),
            ],
        }
    }

    #[test]
    fn test_report_layout() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "sky.jpg:",
                "  Dimensions: 1024 pixels, 768 lines, 3 channels.",
                "  Range: 3 to 250",
                "  Mean: 117.46 (direct summation)",
                "  Mean: 117.46 (channel histogram)",
                "  Standard deviation: 40.12",
                "  Band coverage: dark 12.5%, medium 0.0%, light 50.0%",
            ]
        );
    }

    #[test]
    fn test_resize_notice_only_when_resized() {
        let mut report = sample();
        assert!(!report.to_string().contains("re-sizing"));

        report.resized_to = Some((800, 600));
        assert!(report
            .to_string()
            .contains("  [re-sizing to 800 x 600 pixels for display]\n"));
    }
}

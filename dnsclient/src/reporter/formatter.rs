use super::*;
use std::fmt::{self, Debug};

/// Trait for formatting resolutions.
///
/// A `ReplyFormatter` defines how a decoded reply and its timing are converted
/// into an output type.
pub trait ReplyFormatter {
    type Output: Debug;

    fn format(&self, resolution: &Resolution) -> Self::Output;
}

/// Formats resolutions as the tab-separated text report.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;
/// Formats resolutions as structured Rust types (`ReplyReport`).
#[derive(Debug, Default, Clone, Copy)]
pub struct StructuredFormatter;
/// Formats resolutions as JSON strings.
#[cfg(feature = "json")]
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter {
    pub pretty: bool,
}

/// The text form of a report, written line by line.
struct TextReport<'a>(&'a ReplyReport);

impl TextReport<'_> {
    fn section(f: &mut fmt::Formatter<'_>, title: &str, records: &[RecordLine]) -> fmt::Result {
        writeln!(f, "***{title} Section ({} records)***", records.len())?;
        for record in records {
            let auth = if record.authoritative { "auth" } else { "nonauth" };
            match (record.record_type.as_str(), record.preference) {
                ("A", _) => writeln!(f, "IP\t{}\t{}\t{auth}", record.value, record.ttl)?,
                (kind, Some(preference)) => writeln!(
                    f,
                    "{kind}\t{}\t{preference}\t{}\t{auth}",
                    record.value, record.ttl
                )?,
                (kind, None) => writeln!(f, "{kind}\t{}\t{}\t{auth}", record.value, record.ttl)?,
            }
        }
        Ok(())
    }
}

impl Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        writeln!(
            f,
            "Response received after {:.3} seconds ({} retries)",
            report.elapsed_secs, report.retries
        )?;

        if report.not_found {
            return writeln!(f, "NOTFOUND");
        }

        Self::section(f, "Answer", &report.answers)?;
        if !report.additionals.is_empty() {
            Self::section(f, "Additional", &report.additionals)?;
        }
        if !report.skipped.is_empty() {
            writeln!(f, "***Unsupported Records ({} records)***", report.skipped.len())?;
            for skipped in &report.skipped {
                writeln!(f, "TYPE{}\t{}\t{}", skipped.record_type, skipped.owner, skipped.section)?;
            }
        }
        Ok(())
    }
}

impl ReplyFormatter for TextFormatter {
    type Output = String;

    fn format(&self, resolution: &Resolution) -> Self::Output {
        TextReport(&ReplyReport::from(resolution)).to_string()
    }
}

impl ReplyFormatter for StructuredFormatter {
    type Output = ReplyReport;

    fn format(&self, resolution: &Resolution) -> Self::Output {
        ReplyReport::from(resolution)
    }
}

#[cfg(feature = "json")]
impl ReplyFormatter for JsonFormatter {
    type Output = Result<String, serde_json::Error>;

    fn format(&self, resolution: &Resolution) -> Self::Output {
        let report = ReplyReport::from(resolution);
        if self.pretty {
            serde_json::to_string_pretty(&report)
        } else {
            serde_json::to_string(&report)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::mx_resolution;
    use super::*;
    use crate::dns::resolver::message::fixtures::{Rdata, ReplyBuilder};
    use crate::dns::resolver::{DecodedReply, QuerySpec, RecordType};
    use std::time::Duration;

    #[test]
    fn test_text_formatter_mx_report() {
        let text = TextFormatter.format(&mx_resolution());

        assert_eq!(
            text,
            "Response received after 1.500 seconds (2 retries)\n\
             ***Answer Section (2 records)***\n\
             MX\tmx1.mcgill.ca\t10\t3600\tauth\n\
             MX\tmx2.mcgill.ca\t20\t3600\tauth\n\
             ***Additional Section (1 records)***\n\
             IP\t132.206.85.18\t60\tauth\n"
        );
    }

    #[test]
    fn test_text_formatter_a_and_ns_lines() {
        let message = ReplyBuilder::new(3, "example.com", RecordType::Ns)
            .record(1, "example.com", 2, 86400, Rdata::Name("a.iana-servers.net"))
            .record(1, "example.com", 1, 300, Rdata::Raw(&[93, 184, 216, 34]))
            .build();
        let resolution = Resolution {
            query: QuerySpec::new("example.com", RecordType::Ns).with_id(3),
            reply: DecodedReply::decode(&message).unwrap(),
            elapsed: Duration::from_millis(20),
            retries: 0,
        };

        let text = TextFormatter.format(&resolution);

        assert!(text.contains("NS\ta.iana-servers.net\t86400\tnonauth\n"));
        assert!(text.contains("IP\t93.184.216.34\t300\tnonauth\n"));
        assert!(!text.contains("Additional"));
    }

    #[test]
    fn test_text_formatter_not_found() {
        let message = ReplyBuilder::new(4, "nothing.example", RecordType::A).build();
        let resolution = Resolution {
            query: QuerySpec::new("nothing.example", RecordType::A).with_id(4),
            reply: DecodedReply::decode(&message).unwrap(),
            elapsed: Duration::from_millis(5),
            retries: 0,
        };

        let text = TextFormatter.format(&resolution);

        assert!(text.ends_with("NOTFOUND\n"));
        assert!(!text.contains("Answer Section"));
    }

    #[test]
    fn test_text_formatter_lists_unsupported_answers() {
        let message = ReplyBuilder::new(6, "www.example.com", RecordType::A)
            .record(1, "www.example.com", 5, 60, Rdata::Name("example.com"))
            .build();
        let resolution = Resolution {
            query: QuerySpec::new("www.example.com", RecordType::A).with_id(6),
            reply: DecodedReply::decode(&message).unwrap(),
            elapsed: Duration::from_millis(5),
            retries: 0,
        };

        let text = TextFormatter.format(&resolution);

        assert!(!text.contains("NOTFOUND"));
        assert!(text.contains("***Answer Section (0 records)***\n"));
        assert!(text.ends_with(
            "***Unsupported Records (1 records)***\nTYPE5\twww.example.com\tanswer\n"
        ));
    }

    #[test]
    fn test_structured_formatter() {
        let report = StructuredFormatter.format(&mx_resolution());
        assert_eq!(report.answers[1].preference, Some(20));
        assert!(report.skipped.is_empty());
    }

    #[cfg(feature = "json")]
    #[test]
    fn test_json_formatter() {
        let json = JsonFormatter::default().format(&mx_resolution()).unwrap();
        let report: ReplyReport = serde_json::from_str(&json).unwrap();

        assert_eq!(report, ReplyReport::from(&mx_resolution()));
        assert!(json.contains("\"record_type\":\"MX\""));
        assert!(json.contains("\"preference\":10"));
    }
}

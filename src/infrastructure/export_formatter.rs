// File exporter - CSV and XML renderings of recorded history
use crate::application::export::{ExportArtifact, ExportData, ExportFormat, ExportFormatter, SystemAction};
use crate::domain::parameter::ParameterKind;
use crate::infrastructure::config::BrandingSettings;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;

const CSV_HEADERS: [&str; 8] = [
    "Timestamp",
    "Chainage",
    "Gauge",
    "Alignment",
    "Unevenness",
    "Twist",
    "Cross Level",
    "Speed",
];

#[derive(Debug, Clone)]
pub struct FileExporter {
    branding: BrandingSettings,
}

impl FileExporter {
    pub fn new(branding: BrandingSettings) -> Self {
        Self { branding }
    }

    /// "Team AAMCA" -> "teamaamca"
    fn filename_slug(&self) -> String {
        self.branding
            .company_name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect()
    }

    fn filename(&self, extension: &str, exported_at: DateTime<Utc>) -> String {
        format!(
            "itms_data_{}_{}.{}",
            self.filename_slug(),
            exported_at.timestamp_millis(),
            extension
        )
    }

    fn to_csv(&self, data: &ExportData<'_>) -> String {
        let mut rows = vec![
            format!("# Generated by {}", self.branding.company_name),
            format!("# Website: {}", self.branding.website),
            format!("# Export Date: {}", iso_timestamp(data.exported_at)),
            CSV_HEADERS.join(","),
        ];

        // snapshots carry no speed, every row reports the current one
        let speed = data.position.speed;
        for snapshot in data.history.iter() {
            let timestamp = DateTime::from_timestamp_millis(snapshot.timestamp_ms())
                .map(iso_timestamp)
                .unwrap_or_default();
            let mut row = vec![timestamp, snapshot.chainage_km().to_string()];
            row.extend(ParameterKind::ALL.iter().map(|kind| snapshot.value_of(*kind).to_string()));
            row.push(speed.to_string());
            rows.push(row.join(","));
        }

        rows.join("\n")
    }

    fn to_xml(&self, data: &ExportData<'_>) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<itms_data>\n");

        xml.push_str("    <export_info>\n");
        push_element(&mut xml, "generated_by", &self.branding.company_name);
        push_element(&mut xml, "website", &self.branding.website);
        push_element(&mut xml, "timestamp", &iso_timestamp(data.exported_at));
        push_element(&mut xml, "version", &self.branding.version);
        xml.push_str("    </export_info>\n");

        xml.push_str("    <current_parameters>\n");
        for (kind, model) in data.parameters {
            let _ = writeln!(
                xml,
                "        <{} value=\"{}\" status=\"{}\"/>",
                kind.name(),
                model.value(),
                model.status()
            );
        }
        xml.push_str("    </current_parameters>\n");

        let position = data.position;
        xml.push_str("    <gps_position>\n");
        push_element(&mut xml, "latitude", &position.latitude.to_string());
        push_element(&mut xml, "longitude", &position.longitude.to_string());
        push_element(&mut xml, "altitude", &position.altitude.to_string());
        push_element(&mut xml, "speed", &position.speed.to_string());
        push_element(&mut xml, "chainage", &position.chainage_label());
        xml.push_str("    </gps_position>\n");

        xml.push_str("</itms_data>");
        xml
    }

    fn database_notice(&self) -> String {
        format!(
            "Database export initiated by {}.\n\nData will be stored in the central repository.\nContact: {}",
            self.branding.company_name, self.branding.website
        )
    }

    fn diagnostics_notice(&self) -> String {
        format!(
            "System Diagnostics Complete - {} ITMS\n\n\
             ✓ All sensors operational\n✓ Data acquisition normal\n✓ Communication stable\n✓ Storage capacity OK\n\n\
             No issues detected.\n\nFor support visit: {}",
            self.branding.company_name, self.branding.website
        )
    }

    fn report_notice(&self) -> String {
        format!(
            "Generating comprehensive track analysis report...\n\n\
             Report by: {}\nSystem: {}\nWebsite: {}\n\n\
             Report will be available in the Downloads section.",
            self.branding.company_name, self.branding.version, self.branding.website
        )
    }
}

impl ExportFormatter for FileExporter {
    fn export(&self, format: ExportFormat, data: ExportData<'_>) -> ExportArtifact {
        match format {
            ExportFormat::Csv => ExportArtifact::File {
                filename: self.filename("csv", data.exported_at),
                mime_type: "text/csv",
                content: self.to_csv(&data),
            },
            ExportFormat::Xml => ExportArtifact::File {
                filename: self.filename("xml", data.exported_at),
                mime_type: "application/xml",
                content: self.to_xml(&data),
            },
            ExportFormat::Database => ExportArtifact::Notice(self.database_notice()),
        }
    }

    fn action_notice(&self, action: SystemAction) -> ExportArtifact {
        let message = match action {
            SystemAction::Diagnostics => self.diagnostics_notice(),
            SystemAction::Report => self.report_notice(),
        };
        tracing::info!(?action, "system action requested");
        ExportArtifact::Notice(message)
    }
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn push_element(xml: &mut String, name: &str, text: &str) {
    let _ = writeln!(xml, "        <{name}>{}</{name}>", escape_xml(text));
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

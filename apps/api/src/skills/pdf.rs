//! Job-description PDF handling: text extraction and header scraping.

use bytes::Bytes;

use crate::errors::AppError;
use crate::skills::models::JobHeader;

const UNKNOWN: &str = "Unknown";
const TITLE_LABELS: [&str; 2] = ["Role Title:", "Job Title:"];
const DEPARTMENT_LABELS: [&str; 2] = ["Team:", "Department:"];

/// Extracts plain text from an uploaded PDF on the blocking pool.
/// Unreadable or text-free documents are a client error.
pub async fn extract_text(pdf: Bytes) -> Result<String, AppError> {
    // The parser can panic on malformed documents; a JoinError is treated as unreadable input.
    let extracted =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&pdf)).await;

    match extracted {
        Ok(Ok(text)) if !text.trim().is_empty() => Ok(text),
        Ok(Ok(_)) => Err(empty_pdf()),
        Ok(Err(e)) => {
            tracing::warn!("Error extracting text from PDF: {e}");
            Err(empty_pdf())
        }
        Err(e) => {
            tracing::warn!("PDF extraction task aborted: {e}");
            Err(empty_pdf())
        }
    }
}

fn empty_pdf() -> AppError {
    AppError::Validation("Failed to extract text from the PDF or the PDF is empty".to_string())
}

/// Scans the text for `Role Title:`/`Job Title:` and `Team:`/`Department:` lines.
/// The last matching line wins; missing fields stay "Unknown".
pub fn detect_job_header(text: &str) -> JobHeader {
    let mut header = JobHeader {
        job_title: UNKNOWN.to_string(),
        department: UNKNOWN.to_string(),
    };

    for line in text.lines() {
        if TITLE_LABELS.iter().any(|label| line.contains(label)) {
            header.job_title = strip_labels(line, &TITLE_LABELS);
        }
        if DEPARTMENT_LABELS.iter().any(|label| line.contains(label)) {
            header.department = strip_labels(line, &DEPARTMENT_LABELS);
        }
    }

    header
}

fn strip_labels(line: &str, labels: &[&str]) -> String {
    labels
        .iter()
        .fold(line.to_string(), |acc, label| acc.replace(label, ""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_title_and_department() {
        let text = "Acme Corp\nJob Title: Senior Data Engineer\nDepartment: Analytics\nRequirements...";
        let header = detect_job_header(text);
        assert_eq!(header.job_title, "Senior Data Engineer");
        assert_eq!(header.department, "Analytics");
    }

    #[test]
    fn test_role_title_and_team_labels() {
        let header = detect_job_header("Role Title:  Cloud Architect \nTeam: Platform");
        assert_eq!(header.job_title, "Cloud Architect");
        assert_eq!(header.department, "Platform");
    }

    #[test]
    fn test_missing_labels_default_to_unknown() {
        let header = detect_job_header("We are hiring a Rust developer.");
        assert_eq!(header.job_title, "Unknown");
        assert_eq!(header.department, "Unknown");
    }

    #[test]
    fn test_last_matching_line_wins() {
        let header = detect_job_header("Job Title: First\nJob Title: Second");
        assert_eq!(header.job_title, "Second");
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_are_rejected() {
        let err = extract_text(Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}

//! Certificate display formatting
//!
//! Formats certificates for terminal output in table and detail views.

use crate::models::CertificateRecord;
use crate::storage::SearchPage;

/// Format a page of search results as a table
pub fn format_search_results(page: &SearchPage) -> String {
    if page.rows.is_empty() {
        return "No certificates found.".to_string();
    }

    let product_width = page
        .rows
        .iter()
        .map(|r| r.record.product_no.len())
        .max()
        .unwrap_or(7)
        .max(7);

    let serial_width = page
        .rows
        .iter()
        .map(|r| r.record.serial_no.len())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<12}  {:<3}  {:<9}  {:<product_width$}  {:<serial_width$}  {:<11}  {:>6}  {}\n",
        "Cert No",
        "Ed",
        "State",
        "Product",
        "Serial",
        "Date",
        "Qty",
        "Signatory",
        product_width = product_width,
        serial_width = serial_width,
    ));
    output.push_str(&format!(
        "{:-<12}  {:-<3}  {:-<9}  {:-<product_width$}  {:-<serial_width$}  {:-<11}  {:->6}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        "",
        product_width = product_width,
        serial_width = serial_width,
    ));

    for row in &page.rows {
        let record = &row.record;
        // Superseded editions are marked with an asterisk
        let edition = if row.is_latest_edition {
            format!("{}", record.edition)
        } else {
            format!("{}*", record.edition)
        };

        output.push_str(&format!(
            "{:<12}  {:<3}  {:<9}  {:<product_width$}  {:<serial_width$}  {:<11}  {:>6}  {}\n",
            record.cert_no.as_str(),
            edition,
            record.state.to_string(),
            record.product_no,
            record.serial_no,
            record.display_date(),
            record.quantity,
            record.signatory,
            product_width = product_width,
            serial_width = serial_width,
        ));
    }

    output.push_str(&format!(
        "\nPage {} of {} ({} row{} total; * = superseded edition)\n",
        page.page,
        page.total_pages(),
        page.total,
        if page.total == 1 { "" } else { "s" },
    ));

    output
}

/// Format a single certificate edition's details
pub fn format_certificate_details(record: &CertificateRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Certificate: {} (edition {})\n",
        record.cert_no, record.edition
    ));
    output.push_str(&format!("  State:          {}\n", record.state));
    output.push_str(&format!("  Product No:     {}\n", record.product_no));
    if !record.product_description.is_empty() {
        output.push_str(&format!("  Description:    {}\n", record.product_description));
    }
    if !record.product_type.is_empty() {
        output.push_str(&format!("  Type:           {}\n", record.product_type));
    }
    if !record.manufacturer.is_empty() {
        output.push_str(&format!("  Manufacturer:   {}\n", record.manufacturer));
    }
    output.push_str(&format!("  Serial No:      {}\n", record.serial_no));
    output.push_str(&format!("  Quantity:       {}\n", record.quantity));
    output.push_str(&format!("  Amendment:      {}\n", record.amendment));
    output.push_str(&format!("  Signatory:      {}\n", record.signatory));
    output.push_str(&format!("  Date:           {}\n", record.display_date()));

    if !record.authorisation.is_empty() {
        output.push_str(&format!("  Authorisation:  {}\n", record.authorisation));
    }
    if !record.item.is_empty() {
        output.push_str(&format!("  Item:           {}\n", record.item));
    }
    if !record.status.is_empty() {
        output.push_str(&format!("  Status:         {}\n", record.status));
    }
    if !record.approved.is_empty() {
        output.push_str(&format!("  Approved:       {}\n", record.approved));
    }

    let remarks = [
        &record.remarks1,
        &record.remarks2,
        &record.remarks3,
        &record.remarks4,
    ];
    if remarks.iter().any(|r| !r.is_empty()) {
        output.push('\n');
        for remark in remarks.into_iter().filter(|r| !r.is_empty()) {
            output.push_str(&format!("  Remark: {}\n", remark));
        }
    }

    if !record.comment.is_empty() {
        output.push('\n');
        output.push_str(&format!("  Comment: {}\n", record.comment));
    }

    output.push('\n');
    output.push_str(&format!(
        "  Created: {}\n",
        record.created_at.format("%Y-%m-%d %H:%M UTC")
    ));

    output
}

/// Format a certificate's edition history, oldest first
pub fn format_edition_list(editions: &[CertificateRecord]) -> String {
    if editions.is_empty() {
        return "No editions found.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Certificate: {}\n", editions[0].cert_no));

    for (i, record) in editions.iter().enumerate() {
        let marker = if i == editions.len() - 1 {
            " (current)"
        } else {
            ""
        };
        output.push_str(&format!(
            "  Edition {}  {:<9}  {}  qty {}{}\n",
            record.edition,
            record.state.to_string(),
            record.display_date(),
            record.quantity,
            marker,
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CertState, CertificateNumber, Edition};
    use crate::storage::SearchRow;
    use chrono::{NaiveDate, Utc};

    fn record(edition: u32, state: CertState) -> CertificateRecord {
        CertificateRecord {
            cert_no: CertificateNumber::new("AB936000"),
            edition: Edition::from_number(edition).unwrap(),
            product_no: "PN-100".into(),
            product_description: "Widget".into(),
            product_type: String::new(),
            manufacturer: String::new(),
            serial_no: "SN-0042".into(),
            serialization: String::new(),
            amendment: "A1".into(),
            signatory: "R. Vance".into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 18).unwrap(),
            quantity: "05".into(),
            remarks1: String::new(),
            remarks2: String::new(),
            remarks3: String::new(),
            remarks4: String::new(),
            authorisation: String::new(),
            item: String::new(),
            status: String::new(),
            approved: String::new(),
            state,
            comment: String::new(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_format_search_results() {
        let page = SearchPage {
            rows: vec![
                SearchRow {
                    record: record(1, CertState::Valid),
                    is_latest_edition: true,
                },
                SearchRow {
                    record: record(0, CertState::Printed),
                    is_latest_edition: false,
                },
            ],
            total: 2,
            page: 1,
            page_size: 25,
        };

        let output = format_search_results(&page);
        assert!(output.contains("AB936000"));
        assert!(output.contains("00*"));
        assert!(output.contains("Page 1 of 1"));
    }

    #[test]
    fn test_format_empty_results() {
        let page = SearchPage {
            rows: vec![],
            total: 0,
            page: 1,
            page_size: 25,
        };
        assert!(format_search_results(&page).contains("No certificates found"));
    }

    #[test]
    fn test_format_details() {
        let output = format_certificate_details(&record(0, CertState::Valid));
        assert!(output.contains("Certificate: AB936000 (edition 00)"));
        assert!(output.contains("State:          Valid"));
        assert!(output.contains("18 Mar 2024"));
    }

    #[test]
    fn test_format_edition_list_marks_current() {
        let editions = vec![record(0, CertState::Printed), record(1, CertState::Valid)];
        let output = format_edition_list(&editions);
        assert!(output.contains("Edition 01"));
        assert!(output.contains("(current)"));
    }
}

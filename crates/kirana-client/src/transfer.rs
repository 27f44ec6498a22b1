//! Bulk import/export endpoints.
//!
//! Imports upload a spreadsheet as multipart form data; exports and
//! templates come back as opaque blobs the caller writes to disk.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiResult;
use crate::http::ApiClient;

/// Which dataset a bulk file targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    Inventory,
    Customers,
    Vendors,
    Sales,
}

impl DataKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataKind::Inventory => "inventory",
            DataKind::Customers => "customers",
            DataKind::Vendors => "vendors",
            DataKind::Sales => "sales",
        }
    }
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportReport {
    #[serde(default)]
    pub imported: i64,
    #[serde(default)]
    pub skipped: i64,
    #[serde(default)]
    pub errors: Vec<String>,
}

pub struct TransferApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn transfer(&self) -> TransferApi<'_> {
        TransferApi { client: self }
    }
}

impl TransferApi<'_> {
    /// Uploads a spreadsheet for bulk import.
    ///
    /// `payment_status` only applies to sales imports, where every imported
    /// row is stamped with the chosen status.
    pub async fn import(
        &self,
        kind: DataKind,
        file_name: &str,
        data: Vec<u8>,
        payment_status: Option<&str>,
    ) -> ApiResult<ImportReport> {
        let mut form = Form::new()
            .text("import_type", kind.as_str())
            .part("file", Part::bytes(data).file_name(file_name.to_string()));
        if let Some(status) = payment_status {
            form = form.text("payment_status", status.to_string());
        }

        let report: ImportReport = self
            .client
            .send_json(self.client.post("/import_export/import").multipart(form))
            .await?;
        info!(
            kind = kind.as_str(),
            imported = report.imported,
            skipped = report.skipped,
            "Import finished"
        );
        Ok(report)
    }

    /// Downloads the current dataset as a spreadsheet blob.
    pub async fn export(&self, kind: DataKind) -> ApiResult<Vec<u8>> {
        self.client
            .send_bytes(
                self.client
                    .get("/import_export/export")
                    .query(&[("export_type", kind.as_str())]),
            )
            .await
    }

    /// Downloads the empty purchase-entry template.
    pub async fn purchase_template(&self) -> ApiResult<Vec<u8>> {
        self.client
            .send_bytes(self.client.get("/import_export/template/purchase"))
            .await
    }
}

use export_core::contract::{ExportReceipt, ExportRequest};

pub trait TableExporter {
    fn export_table(&self, request: &ExportRequest) -> Result<ExportReceipt, String>;
}

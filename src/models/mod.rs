pub mod dates;
pub mod detail;
pub mod document;
pub mod numeric;
pub mod procurement;
pub mod status;
pub mod workspace;

pub use detail::{
    GrnDetail, GrnDetailSummary, InvoiceDetail, InvoiceDetailSummary, LinkedGrn, LinkedInvoice,
    LinkedPo, PoDetail, PoDetailSummary,
};
pub use document::{Document, DocumentKind};
pub use procurement::{GrnFields, GrnLine, InvoiceFields, PurchaseOrderFields};
pub use status::{
    AcceptanceStatus, GrnInvoiceStatus, InvoiceGrnStatus, InvoicePoStatus, PoInvoiceStatus,
    ReceiptStatus, StatusLabel, StatusTags, HAS_REJECTIONS,
};
pub use workspace::{
    DateRange, GrnSummary, GrnTotals, GrnWorkspace, GrnWorkspaceRow, InvoiceSummary,
    InvoiceTotals, InvoiceWorkspace, InvoiceWorkspaceRow, PageRequest, Pagination, PoSummary,
    PoTotals, PoWorkspace, PoWorkspaceRow, WorkspaceFacets, WorkspaceFilters, WorkspacePage,
};

//! Seller analytics payloads that are rendered rather than interpreted.

/// A product card hidden from search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiddenProduct {
    pub id: String,
    pub name: String,
}

/// An advertising campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advert {
    pub id: u64,
    pub name: String,
}

/// Acknowledgement of a report-generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportTicket {
    /// Client-generated report id sent with the request.
    pub id: uuid::Uuid,
    /// Raw API answer.
    pub response: serde_json::Value,
}

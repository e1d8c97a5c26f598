//! Link resolution and body rewriting for ContentLink.
//!
//! Anchors in a content body that point at the publisher's own articles are
//! resolved to content UUIDs and replaced with `<content>` references:
//!
//! - [`classify`]: picks candidate anchors (direct, shortened, article links)
//! - [`redirect`]: follows shortener redirects to an [`Identifier`](contentlink_shared::Identifier)
//! - [`mapper`]: qualifies article URLs with their originating system
//! - [`locator`]: asks the document store which UUID an identifier maps to
//! - [`fetcher`]: reads content metadata by UUID
//! - [`rewrite`]: swaps the anchor for a content reference
//! - [`LinkResolver`]: runs all of the above over a body with bounded parallelism

pub mod classify;
pub mod client;
pub mod fetcher;
pub mod locator;
pub mod mapper;
pub mod orchestrator;
pub mod patterns;
pub mod redirect;
pub mod rewrite;

mod url_ext;

#[cfg(test)]
mod test_support;

pub use classify::{AnchorCandidate, Classified, LinkKind, classify, classify_href};
pub use client::{
    HttpClient, ProbeClient, ProbeRequest, ProbeResponse, ReadClient, ReadRequest, ReadResponse,
};
pub use fetcher::ContentFetcher;
pub use locator::ContentLocator;
pub use mapper::{AuthorityResolver, BlogAuthorityResolver, IdentifierMapper};
pub use orchestrator::{
    CandidateOutcome, CandidateReport, LinkResolver, ProcessReport, UnchangedReason,
};
pub use patterns::LinkPatterns;
pub use redirect::{RedirectResolver, RedirectVisitSet};
pub use rewrite::{CONTENT_ELEMENT, DocumentRewriter};

//! Resolution Orchestrator: bounded-parallel resolution over a whole body.
//!
//! The body is parsed once, candidates are classified in document order and
//! capped at `max_links`, then each candidate runs on its own task behind a
//! semaphore sized to `pool_size`. Tasks share the document through a mutex
//! and only touch their own anchor. Every candidate ends in a
//! [`CandidateOutcome`]; failures never escape a candidate. The body is
//! re-serialized only if at least one anchor was rewritten.

use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};
use tracing::{debug, info, instrument, warn};

use contentlink_document::Document;
use contentlink_shared::{BlogEndpoint, ContentLinkError, ContentUuid, ResolverConfig, Result};

use crate::classify::{AnchorCandidate, Classified, LinkKind, classify};
use crate::client::{HttpClient, ProbeClient, ReadClient};
use crate::fetcher::ContentFetcher;
use crate::locator::ContentLocator;
use crate::mapper::{AuthorityResolver, BlogAuthorityResolver, IdentifierMapper};
use crate::patterns::LinkPatterns;
use crate::redirect::RedirectResolver;
use crate::rewrite::DocumentRewriter;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Why a candidate was left alone without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnchangedReason {
    /// The link did not resolve to an identifier with an authority.
    NoAuthority,
    /// The document store has no content for the identifier.
    NotInStore,
    /// The content read endpoint does not know the UUID.
    ContentNotFound,
}

/// Result of resolving one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateOutcome {
    Rewritten { uuid: ContentUuid },
    Unchanged(UnchangedReason),
    Failed {
        reason: String,
        service_unavailable: bool,
    },
}

impl CandidateOutcome {
    fn failed(error: &ContentLinkError) -> Self {
        Self::Failed {
            reason: error.to_string(),
            service_unavailable: error.is_service_unavailable(),
        }
    }

    pub fn is_rewritten(&self) -> bool {
        matches!(self, Self::Rewritten { .. })
    }
}

/// Outcome for one candidate, with what it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub href: String,
    pub kind: LinkKind,
    pub outcome: CandidateOutcome,
}

/// Everything `process` produced.
#[derive(Debug, Clone)]
pub struct ProcessReport {
    /// The rewritten body, or the input unchanged.
    pub body: String,
    /// Whether any anchor was rewritten.
    pub changed: bool,
    /// Per-candidate outcomes, in document order.
    pub candidates: Vec<CandidateReport>,
    /// Hrefs beyond `max_links` that were not resolved.
    pub omitted: Vec<String>,
}

impl ProcessReport {
    fn unchanged(body: &str, candidates: Vec<CandidateReport>, omitted: Vec<String>) -> Self {
        Self {
            body: body.to_string(),
            changed: false,
            candidates,
            omitted,
        }
    }

    pub fn rewritten_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|c| c.outcome.is_rewritten())
            .count()
    }

    /// Candidates that failed because the content read service was unavailable.
    pub fn service_unavailable(&self) -> impl Iterator<Item = &CandidateReport> {
        self.candidates.iter().filter(|c| {
            matches!(
                c.outcome,
                CandidateOutcome::Failed {
                    service_unavailable: true,
                    ..
                }
            )
        })
    }
}

// ---------------------------------------------------------------------------
// Per-candidate pipeline
// ---------------------------------------------------------------------------

struct Pipeline {
    redirects: RedirectResolver,
    locator: ContentLocator,
    fetcher: ContentFetcher,
    rewriter: DocumentRewriter,
}

impl Pipeline {
    async fn resolve(
        &self,
        candidate: &AnchorCandidate,
        document: &Mutex<Document>,
    ) -> CandidateOutcome {
        match self.try_resolve(candidate, document).await {
            Ok(outcome) => outcome,
            Err(e) => CandidateOutcome::failed(&e),
        }
    }

    async fn try_resolve(
        &self,
        candidate: &AnchorCandidate,
        document: &Mutex<Document>,
    ) -> Result<CandidateOutcome> {
        let uuid = match candidate.kind {
            LinkKind::DirectContentLink(uuid) => uuid,
            LinkKind::ShortenedLink | LinkKind::PublisherArticleLink => {
                let identifier = self.redirects.resolve(&candidate.href).await?;
                if !identifier.is_actionable() {
                    return Ok(CandidateOutcome::Unchanged(UnchangedReason::NoAuthority));
                }
                match self.locator.locate(&identifier).await {
                    Some(uuid) => uuid,
                    None => return Ok(CandidateOutcome::Unchanged(UnchangedReason::NotInStore)),
                }
            }
        };

        let reference = self.fetcher.fetch(uuid).await?;

        let changed = {
            let mut document = document.lock().await;
            self.rewriter
                .replace(&mut document, candidate.node, reference.as_ref())?
        };

        if changed {
            info!(href = %candidate.href, %uuid, "replaced link with content reference");
            Ok(CandidateOutcome::Rewritten { uuid })
        } else {
            info!(
                href = %candidate.href,
                %uuid,
                "link not replaced: content does not exist"
            );
            Ok(CandidateOutcome::Unchanged(UnchangedReason::ContentNotFound))
        }
    }
}

// ---------------------------------------------------------------------------
// LinkResolver
// ---------------------------------------------------------------------------

/// Rewrites links to the publisher's own content into content references.
pub struct LinkResolver {
    max_links: usize,
    pool_size: usize,
    patterns: Arc<LinkPatterns>,
    pipeline: Arc<Pipeline>,
}

impl LinkResolver {
    /// Build a resolver over explicit collaborators.
    pub fn new(
        config: &ResolverConfig,
        probe: Arc<dyn ProbeClient>,
        read: Arc<dyn ReadClient>,
        authority: Arc<dyn AuthorityResolver>,
    ) -> Result<Self> {
        config.validate()?;

        let patterns = Arc::new(LinkPatterns::from_config(config)?);
        let mapper = IdentifierMapper::new(authority, patterns.clone());

        let pipeline = Pipeline {
            redirects: RedirectResolver::new(
                probe.clone(),
                mapper,
                patterns.clone(),
                config.routing_cookie.clone(),
                config.max_redirects,
            ),
            locator: ContentLocator::new(
                probe,
                &config.document_store_base_uri,
                config.document_store_host.clone(),
                patterns.clone(),
            )?,
            fetcher: ContentFetcher::new(
                read,
                &config.content_read_base_uri,
                config.content_read_host.clone(),
            )?,
            rewriter: DocumentRewriter::new(config.thing_uri_prefix.clone()),
        };

        Ok(Self {
            max_links: config.max_links,
            pool_size: config.pool_size,
            patterns,
            pipeline: Arc::new(pipeline),
        })
    }

    /// Build a resolver that talks HTTP and qualifies URLs with `blogs`.
    pub fn from_config(config: &ResolverConfig, blogs: Vec<BlogEndpoint>) -> Result<Self> {
        let http = Arc::new(HttpClient::new(config.timeout)?);
        Self::new(
            config,
            http.clone(),
            http,
            Arc::new(BlogAuthorityResolver::new(blogs)),
        )
    }

    /// Resolve and rewrite links in `body`.
    ///
    /// Returns the input unchanged unless at least one anchor was rewritten.
    /// Fails only if the body cannot be parsed or the result cannot be serialized.
    pub async fn process(&self, body: &str) -> Result<String> {
        Ok(self.process_with_report(body).await?.body)
    }

    /// Like [`process`](Self::process), also reporting every candidate's outcome.
    #[instrument(skip_all, fields(body_len = body.len()))]
    pub async fn process_with_report(&self, body: &str) -> Result<ProcessReport> {
        if body.is_empty() {
            return Ok(ProcessReport::unchanged(body, Vec::new(), Vec::new()));
        }

        let document = Document::parse(body)?;
        let Classified {
            candidates,
            omitted,
        } = classify(&document, &self.patterns, self.max_links);

        if candidates.is_empty() {
            debug!("no candidate links");
            return Ok(ProcessReport::unchanged(body, Vec::new(), omitted));
        }

        info!(
            candidates = candidates.len(),
            omitted = omitted.len(),
            pool_size = self.pool_size,
            "resolving links"
        );

        let document = Arc::new(Mutex::new(document));
        let semaphore = Arc::new(Semaphore::new(self.pool_size));
        let mut handles = Vec::with_capacity(candidates.len());

        for candidate in &candidates {
            let pipeline = self.pipeline.clone();
            let document = document.clone();
            let semaphore = semaphore.clone();
            let candidate = candidate.clone();

            handles.push(tokio::spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(e) => {
                        return CandidateOutcome::Failed {
                            reason: format!("worker pool closed: {e}"),
                            service_unavailable: false,
                        };
                    }
                };
                pipeline.resolve(&candidate, &document).await
            }));
        }

        let mut reports = Vec::with_capacity(candidates.len());
        for (candidate, handle) in candidates.into_iter().zip(handles) {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => CandidateOutcome::Failed {
                    reason: format!("resolution task failed: {e}"),
                    service_unavailable: false,
                },
            };
            log_outcome(&candidate.href, &outcome);
            reports.push(CandidateReport {
                href: candidate.href,
                kind: candidate.kind,
                outcome,
            });
        }

        let changed = reports.iter().any(|r| r.outcome.is_rewritten());
        if !changed {
            return Ok(ProcessReport::unchanged(body, reports, omitted));
        }

        let serialized = document.lock().await.serialize()?;
        let report = ProcessReport {
            body: serialized,
            changed,
            candidates: reports,
            omitted,
        };
        info!(rewritten = report.rewritten_count(), "links rewritten");
        Ok(report)
    }
}

fn log_outcome(href: &str, outcome: &CandidateOutcome) {
    match outcome {
        CandidateOutcome::Failed {
            reason,
            service_unavailable: true,
        } => warn!(%href, %reason, "content read service unavailable, link left unchanged"),
        CandidateOutcome::Failed { reason, .. } => {
            warn!(%href, %reason, "link resolution failed, link left unchanged")
        }
        CandidateOutcome::Unchanged(reason) => debug!(%href, ?reason, "link left unchanged"),
        CandidateOutcome::Rewritten { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::client::{ProbeResponse, ReadResponse};
    use crate::test_support::{LogCapture, StubProbe, StubRead};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ARTICLE_TYPE: &str = "http://www.ft.com/ontology/content/Article";
    const BLOG_POST: &str = "http://blogs.ft.com/the-world/2015/10/13/a-post/";
    const ALPHA_POST: &str = "http://ftalphaville.ft.com/2015/10/12/2141000/alpha-post/";

    fn uuid(n: u64) -> String {
        format!("00000000-0000-4000-8000-{n:012x}")
    }

    /// Deterministic backend behaviour for the stub clients.
    #[derive(Default, Clone)]
    struct World {
        /// Probe URL -> redirect target.
        redirects: HashMap<String, String>,
        /// Identifier value -> content UUID in the document store.
        store: HashMap<String, String>,
        /// Content UUID -> read endpoint status (200 returns a reference).
        content: HashMap<String, u16>,
    }

    impl World {
        fn standard() -> Self {
            let mut world = World::default();
            world
                .redirects
                .insert("http://on.ft.com/short1".into(), ALPHA_POST.into());
            world
                .redirects
                .insert("http://on.ft.com/loop-a".into(), "http://on.ft.com/loop-b".into());
            world
                .redirects
                .insert("http://on.ft.com/loop-b".into(), "http://on.ft.com/loop-a".into());
            world.store.insert(BLOG_POST.into(), uuid(2));
            world.store.insert(ALPHA_POST.into(), uuid(3));
            for n in 1..=3 {
                world.content.insert(uuid(n), 200);
            }
            world
        }
    }

    struct Harness {
        resolver: LinkResolver,
        probe: Arc<StubProbe>,
        read: Arc<StubRead>,
    }

    fn config(max_links: usize, pool_size: usize) -> ResolverConfig {
        ResolverConfig {
            max_links,
            pool_size,
            shortener_patterns: vec![r"https?://on\.ft\.com/.*".into()],
            document_store_base_uri: "http://store.example".into(),
            content_read_base_uri: "http://read.example/content".into(),
            ..ResolverConfig::default()
        }
    }

    fn harness(world: World, max_links: usize, pool_size: usize) -> Harness {
        let World {
            redirects,
            store,
            content,
        } = world;

        let probe = Arc::new(StubProbe::new(move |request| {
            let url = &request.url;
            if url.host_str() == Some("store.example") {
                let value = url
                    .query_pairs()
                    .find(|(k, _)| k == "identifierValue")
                    .map(|(_, v)| v.into_owned())
                    .unwrap_or_default();
                return Ok(match store.get(&value) {
                    Some(uuid) => ProbeResponse {
                        status: 301,
                        location: Some(format!("http://api.ft.com/content/{uuid}")),
                    },
                    None => ProbeResponse {
                        status: 404,
                        location: None,
                    },
                });
            }
            Ok(match redirects.get(url.as_str()) {
                Some(location) => ProbeResponse {
                    status: 302,
                    location: Some(location.clone()),
                },
                None => ProbeResponse {
                    status: 200,
                    location: None,
                },
            })
        }));

        let read = Arc::new(StubRead::new(move |request| {
            let uuid = request
                .url
                .path_segments()
                .and_then(|mut segments| segments.next_back())
                .unwrap_or_default()
                .to_string();
            let status = content.get(&uuid).copied().unwrap_or(404);
            let body = if status == 200 {
                serde_json::json!({
                    "id": format!("http://www.ft.com/thing/{uuid}"),
                    "type": ARTICLE_TYPE,
                    "title": "Some title",
                })
                .to_string()
            } else {
                String::new()
            };
            Ok(ReadResponse { status, body })
        }));

        let blogs = BlogAuthorityResolver::new(vec![
            BlogEndpoint {
                host: "blogs.ft.com/the-world".into(),
                id: "FT-LABS-WP-1-24".into(),
            },
            BlogEndpoint {
                host: "ftalphaville.ft.com".into(),
                id: "FT-LABS-WP-1-2".into(),
            },
        ]);

        let resolver = LinkResolver::new(
            &config(max_links, pool_size),
            probe.clone(),
            read.clone(),
            Arc::new(blogs),
        )
        .unwrap();

        Harness {
            resolver,
            probe,
            read,
        }
    }

    fn load_fixture(name: &str) -> String {
        let path = format!("{}/../../../fixtures/xml/{name}", env!("CARGO_MANIFEST_DIR"));
        std::fs::read_to_string(&path).unwrap_or_else(|_| panic!("missing fixture: {path}"))
    }

    #[tokio::test]
    async fn body_without_candidates_is_identical() {
        let h = harness(World::standard(), 10, 4);
        let body = "<body>\n  <p class='x'>No <a href=\"http://www.example.com/\">links</a> of interest.<br /></p>\n</body>";

        assert_eq!(h.resolver.process(body).await.unwrap(), body);
        assert_eq!(h.probe.calls(), 0);
        assert_eq!(h.read.calls(), 0);
    }

    #[tokio::test]
    async fn empty_body_is_returned_as_is() {
        let h = harness(World::standard(), 10, 4);
        assert_eq!(h.resolver.process("").await.unwrap(), "");
    }

    #[tokio::test]
    async fn failed_resolutions_leave_body_identical() {
        let h = harness(World::default(), 10, 4);
        // Non-canonical quoting and spacing must survive untouched.
        let body = format!(
            "<body><p><a href='http://www.ft.com/content/{}' >gone</a> <a href='http://on.ft.com/nowhere'>short</a> <a href='{BLOG_POST}'>post</a><br /></p></body>",
            uuid(7)
        );

        let report = h.resolver.process_with_report(&body).await.unwrap();
        assert_eq!(report.body, body);
        assert!(!report.changed);
        assert_eq!(
            report
                .candidates
                .iter()
                .map(|c| c.outcome.clone())
                .collect::<Vec<_>>(),
            vec![
                CandidateOutcome::Unchanged(UnchangedReason::ContentNotFound),
                CandidateOutcome::Unchanged(UnchangedReason::NoAuthority),
                CandidateOutcome::Unchanged(UnchangedReason::NotInStore),
            ]
        );
    }

    #[tokio::test]
    async fn direct_content_link_is_rewritten_in_place() {
        let h = harness(World::standard(), 10, 4);
        let body = format!(
            r#"<body><p>Before <a href="http://www.ft.com/cms/s/0/{}.html" title="t">Read <em>this</em></a> after.</p></body>"#,
            uuid(1)
        );

        let out = h.resolver.process(&body).await.unwrap();
        assert_eq!(
            out,
            format!(
                r#"<body><p>Before <content id="{}" type="{ARTICLE_TYPE}">Read <em>this</em></content> after.</p></body>"#,
                uuid(1)
            )
        );
        // Direct links skip the redirect and store lookups.
        assert_eq!(h.probe.calls(), 0);
        assert_eq!(h.read.calls(), 1);
    }

    #[tokio::test]
    async fn shortened_link_resolves_through_redirect_and_store() {
        let h = harness(World::standard(), 10, 4);
        let body = r#"<body><a href="http://on.ft.com/short1">alpha</a></body>"#;

        let report = h.resolver.process_with_report(body).await.unwrap();
        assert_eq!(
            report.body,
            format!(
                r#"<body><content id="{}" type="{ARTICLE_TYPE}">alpha</content></body>"#,
                uuid(3)
            )
        );
        assert_eq!(report.candidates[0].kind, LinkKind::ShortenedLink);
        // one redirect probe, one store query
        assert_eq!(h.probe.calls(), 2);
    }

    #[tokio::test]
    async fn publisher_article_link_is_looked_up_directly() {
        let h = harness(World::standard(), 10, 4);
        let body = format!(r#"<body><a href="{BLOG_POST}">post</a></body>"#);

        let out = h.resolver.process(&body).await.unwrap();
        assert!(out.contains(&format!(r#"<content id="{}""#, uuid(2))));
        // store query only, no probe of the article itself
        assert_eq!(h.probe.calls(), 1);
    }

    #[tokio::test]
    async fn circular_redirect_terminates_without_rewrite() {
        let logs = LogCapture::default();
        let _guard = logs.install();
        let h = harness(World::standard(), 10, 4);
        let body = r#"<body><a href="http://on.ft.com/loop-a">loop</a></body>"#;

        let report = h.resolver.process_with_report(body).await.unwrap();
        assert!(logs.contents().contains("encountered circular redirection"));
        assert_eq!(report.body, body);
        assert_eq!(
            report.candidates[0].outcome,
            CandidateOutcome::Unchanged(UnchangedReason::NoAuthority)
        );
        assert_eq!(h.probe.calls(), 2);
    }

    #[tokio::test]
    async fn only_first_max_links_are_resolved() {
        let h = harness(World::standard(), 2, 4);
        let link = |n: u64| format!(r#"<a href="http://www.ft.com/content/{}">{n}</a>"#, uuid(n));
        let body = format!("<body>{}{}{}</body>", link(1), link(2), link(3));

        let report = h.resolver.process_with_report(&body).await.unwrap();
        assert_eq!(report.candidates.len(), 2);
        assert_eq!(report.rewritten_count(), 2);
        assert_eq!(report.omitted, vec![format!("http://www.ft.com/content/{}", uuid(3))]);
        assert!(report.body.ends_with(&format!("{}</body>", link(3))));
        assert_eq!(h.read.calls(), 2);
    }

    #[tokio::test]
    async fn service_unavailable_does_not_stop_siblings() {
        let mut world = World::standard();
        world.content.insert(uuid(5), 503);
        let h = harness(world, 10, 4);
        let body = format!(
            r#"<body><a href="http://www.ft.com/content/{}">down</a><a href="http://www.ft.com/content/{}">up</a></body>"#,
            uuid(5),
            uuid(1)
        );

        let report = h.resolver.process_with_report(&body).await.unwrap();
        assert_eq!(
            report.body,
            format!(
                r#"<body><a href="http://www.ft.com/content/{}">down</a><content id="{}" type="{ARTICLE_TYPE}">up</content></body>"#,
                uuid(5),
                uuid(1)
            )
        );
        let unavailable: Vec<&CandidateReport> = report.service_unavailable().collect();
        assert_eq!(unavailable.len(), 1);
        assert!(unavailable[0].href.contains(&uuid(5)));
    }

    #[tokio::test]
    async fn network_failures_are_per_candidate() {
        let h = harness(World::standard(), 10, 4);
        let body = format!(
            r#"<body><a href="http://on.ft.com/short1">ok</a><a href="http://www.ft.com/content/{}">direct</a></body>"#,
            uuid(1)
        );
        // Same world, but the probe fails outright for every request.
        let failing = LinkResolver::new(
            &config(10, 4),
            Arc::new(StubProbe::new(|r| {
                Err(ContentLinkError::Network(format!("{}: connection reset", r.url)))
            })),
            h.read.clone(),
            Arc::new(BlogAuthorityResolver::default()),
        )
        .unwrap();

        let report = failing.process_with_report(&body).await.unwrap();
        assert!(matches!(
            report.candidates[0].outcome,
            CandidateOutcome::Failed {
                service_unavailable: false,
                ..
            }
        ));
        assert!(report.candidates[1].outcome.is_rewritten());
    }

    #[tokio::test]
    async fn timed_out_read_fails_only_its_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/content/{}", uuid(5))))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/content/{}", uuid(1))))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": format!("http://www.ft.com/thing/{}", uuid(1)),
                "type": ARTICLE_TYPE,
            })))
            .mount(&server)
            .await;

        let mut config = config(10, 4);
        config.content_read_base_uri = format!("{}/content", server.uri());
        config.timeout = Duration::from_millis(50);
        let resolver = LinkResolver::from_config(&config, Vec::new()).unwrap();

        let slow = format!(r#"<a href="http://www.ft.com/content/{}">slow</a>"#, uuid(5));
        let body = format!(
            r#"<body>{slow}<a href="http://www.ft.com/content/{}">fast</a></body>"#,
            uuid(1)
        );

        let report = resolver.process_with_report(&body).await.unwrap();
        assert_eq!(
            report.body,
            format!(
                r#"<body>{slow}<content id="{}" type="{ARTICLE_TYPE}">fast</content></body>"#,
                uuid(1)
            )
        );
        match &report.candidates[0].outcome {
            CandidateOutcome::Failed {
                reason,
                service_unavailable,
            } => {
                assert!(reason.contains("timed out"), "{reason}");
                assert!(!service_unavailable);
            }
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn pool_size_does_not_change_output() {
        let body = load_fixture("article-body.xml");

        let sequential = harness(World::standard(), 50, 1);
        let parallel = harness(World::standard(), 50, 8);

        let one = sequential.resolver.process(&body).await.unwrap();
        let many = parallel.resolver.process(&body).await.unwrap();

        assert_eq!(one, many);
        assert_eq!(one.matches("<content ").count(), 3);
        assert!(one.contains(r#"<a href="http://www.example.com/page">link</a>"#));
        assert!(one.contains(r#"<a href="http://on.ft.com/dead">short link</a>"#));
        assert!(one.ends_with("</body>\n"));
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let h = harness(World::standard(), 10, 4);
        let err = h
            .resolver
            .process("<body><p>unclosed</body>")
            .await
            .unwrap_err();
        assert!(matches!(err, ContentLinkError::Parse { .. }));
    }

    #[test]
    fn zero_pool_size_is_rejected() {
        let result = LinkResolver::new(
            &config(10, 0),
            Arc::new(StubProbe::new(|_| unreachable!())),
            Arc::new(StubRead::new(|_| unreachable!())),
            Arc::new(BlogAuthorityResolver::default()),
        );
        assert!(matches!(result, Err(ContentLinkError::Config { .. })));
    }
}

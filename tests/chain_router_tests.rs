use chainrouter::context::{Request, RequestContext};
use chainrouter::error::{GenerateError, MatchError};
use chainrouter::generator::{GenerateParams, RouteTarget, UrlReference};
use chainrouter::matcher::{RouteMatch, ROUTE_NAME_FIELD};
use chainrouter::route::{Route, RouteCollection, Routes};
use chainrouter::router::{ChainRouter, Router};
use http::Method;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};

/// What a scripted router should do when asked to match or generate.
#[derive(Clone, Copy)]
enum Outcome {
    Succeed,
    NotFound,
    MethodNotAllowed,
    Fail,
}

/// Router test double that records the order it was consulted in.
struct ScriptedRouter {
    name: &'static str,
    outcome: Outcome,
    supports_all_targets: bool,
    log: Arc<Mutex<Vec<String>>>,
    context: RwLock<Option<RequestContext>>,
}

impl ScriptedRouter {
    fn new(name: &'static str, outcome: Outcome, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self {
            name,
            outcome,
            supports_all_targets: false,
            log,
            context: RwLock::new(None),
        }
    }

    fn supporting_all_targets(mut self) -> Self {
        self.supports_all_targets = true;
        self
    }

    fn record(&self, action: &str) {
        self.log
            .lock()
            .unwrap()
            .push(format!("{}:{}", self.name, action));
    }
}

impl Router for ScriptedRouter {
    fn match_url(&self, _url: &str) -> Result<RouteMatch, MatchError> {
        self.record("match");
        match self.outcome {
            Outcome::Succeed => {
                let mut result = RouteMatch::new();
                result.set(ROUTE_NAME_FIELD, self.name);
                Ok(result)
            }
            Outcome::NotFound => Err(MatchError::NotFound(format!("{} missed", self.name))),
            Outcome::MethodNotAllowed => Err(MatchError::MethodNotAllowed {
                allowed: vec![Method::POST],
            }),
            Outcome::Fail => Err(MatchError::Failure(anyhow::anyhow!(
                "{} backend down",
                self.name
            ))),
        }
    }

    fn generate(
        &self,
        _target: &RouteTarget,
        _params: &GenerateParams,
        _reference: UrlReference,
    ) -> Result<String, GenerateError> {
        self.record("generate");
        match self.outcome {
            Outcome::Succeed => Ok(format!("/{}", self.name)),
            Outcome::Fail => Err(GenerateError::Failure(anyhow::anyhow!(
                "{} backend down",
                self.name
            ))),
            _ => Err(GenerateError::NotFound(format!("{} missed", self.name))),
        }
    }

    fn supports_target(&self, target: &RouteTarget) -> bool {
        self.supports_all_targets || target.is_name()
    }

    fn route_debug_message(&self, _target: &RouteTarget, _params: &GenerateParams) -> String {
        format!("router {} cannot generate this target", self.name)
    }

    fn set_context(&self, context: RequestContext) {
        self.record("set_context");
        *self.context.write().unwrap() = Some(context);
    }

    fn context(&self) -> RequestContext {
        self.context.read().unwrap().clone().unwrap_or_default()
    }

    fn route_collection(&self) -> Arc<dyn Routes> {
        let mut collection = RouteCollection::new();
        collection.add(self.name, Arc::new(Route::new(format!("/{}", self.name))));
        Arc::new(collection)
    }

    fn warm_up(&self, cache_dir: &Path) {
        self.record(&format!("warm_up:{}", cache_dir.display()));
    }
}

fn log() -> Arc<Mutex<Vec<String>>> {
    Arc::new(Mutex::new(Vec::new()))
}

fn no_params() -> BTreeMap<String, String> {
    BTreeMap::new()
}

#[test]
fn test_all_sorted_by_descending_priority_stable_within_ties() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("low", Outcome::NotFound, log.clone())),
        10,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("high", Outcome::NotFound, log.clone())),
        100,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("tie_a", Outcome::NotFound, log.clone())),
        50,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("tie_b", Outcome::NotFound, log.clone())),
        50,
    );

    let _ = chain.match_url("/x");
    assert_eq!(
        *log.lock().unwrap(),
        vec!["high:match", "tie_a:match", "tie_b:match", "low:match"]
    );
}

#[test]
fn test_add_after_read_invalidates_sorted_view() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("first", Outcome::NotFound, log.clone())),
        0,
    );
    assert_eq!(chain.all().len(), 1);

    chain.add(
        Arc::new(ScriptedRouter::new("second", Outcome::NotFound, log.clone())),
        10,
    );
    let _ = chain.match_url("/x");
    assert_eq!(*log.lock().unwrap(), vec!["second:match", "first:match"]);
}

#[test]
fn test_method_not_allowed_preferred_over_not_found() {
    // The method-not-allowed comes from the higher-priority router that ran
    // first; it must win over the later bare miss.
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("miss", Outcome::NotFound, log.clone())),
        10,
    );
    chain.add(
        Arc::new(ScriptedRouter::new(
            "wrong_method",
            Outcome::MethodNotAllowed,
            log.clone(),
        )),
        100,
    );

    let err = chain.match_url("/x").unwrap_err();
    match err {
        MatchError::MethodNotAllowed { allowed } => assert_eq!(allowed, vec![Method::POST]),
        other => panic!("expected MethodNotAllowed, got {other:?}"),
    }
}

#[test]
fn test_lower_priority_success_after_higher_priority_miss() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("winner", Outcome::Succeed, log.clone())),
        10,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("loser", Outcome::NotFound, log.clone())),
        100,
    );

    let result = chain.match_url("/x").unwrap();
    assert_eq!(result.route_name(), Some("winner"));
    assert_eq!(*log.lock().unwrap(), vec!["loser:match", "winner:match"]);
}

#[test]
fn test_fatal_failure_aborts_chain() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("never_asked", Outcome::Succeed, log.clone())),
        10,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("broken", Outcome::Fail, log.clone())),
        100,
    );

    let err = chain.match_url("/x").unwrap_err();
    assert!(matches!(err, MatchError::Failure(_)));
    assert_eq!(*log.lock().unwrap(), vec!["broken:match"]);
}

#[test]
fn test_exhausted_chain_reports_generic_not_found() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("a", Outcome::NotFound, log.clone())),
        0,
    );

    let err = chain.match_url("/nothing").unwrap_err();
    match err {
        MatchError::NotFound(reason) => assert!(reason.contains("/nothing")),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_generate_returns_first_success() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("fallback", Outcome::Succeed, log.clone())),
        0,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("primary", Outcome::NotFound, log.clone())),
        10,
    );

    let url = chain
        .generate(
            &RouteTarget::name("anything"),
            &no_params(),
            UrlReference::AbsolutePath,
        )
        .unwrap();
    assert_eq!(url, "/fallback");
    assert_eq!(
        *log.lock().unwrap(),
        vec!["primary:generate", "fallback:generate"]
    );
}

#[test]
fn test_generate_aggregates_unique_debug_hints() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("a", Outcome::NotFound, log.clone())),
        10,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("b", Outcome::NotFound, log.clone())),
        0,
    );

    let err = chain
        .generate(
            &RouteTarget::name("anything"),
            &no_params(),
            UrlReference::AbsolutePath,
        )
        .unwrap_err();
    match err {
        GenerateError::NotFound(reason) => {
            assert!(reason.contains("router a cannot generate this target"));
            assert!(reason.contains("router b cannot generate this target"));
        }
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_generate_skips_routers_not_supporting_object_targets() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("names_only", Outcome::Succeed, log.clone())),
        100,
    );
    chain.add(
        Arc::new(
            ScriptedRouter::new("versatile", Outcome::Succeed, log.clone())
                .supporting_all_targets(),
        ),
        0,
    );

    let target = RouteTarget::Route(Arc::new(Route::new("/somewhere")));
    let url = chain
        .generate(&target, &no_params(), UrlReference::AbsolutePath)
        .unwrap();
    assert_eq!(url, "/versatile");
    // the names-only router must not even be asked
    assert_eq!(*log.lock().unwrap(), vec!["versatile:generate"]);
}

#[test]
fn test_context_propagated_to_router_added_after_set_context() {
    let log = log();
    let chain = ChainRouter::new();
    chain.set_context(RequestContext::new().with_host("example.com"));

    let late = Arc::new(ScriptedRouter::new("late", Outcome::NotFound, log.clone()));
    chain.add(Arc::clone(&late) as Arc<dyn Router>, 0);

    // context is pushed at read time, before the router is first used
    let _ = chain.match_url("/x");
    assert_eq!(late.context().host(), "example.com");
    assert_eq!(
        *log.lock().unwrap(),
        vec!["late:set_context", "late:match"]
    );
}

#[test]
fn test_route_collection_aggregates_children() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("alpha", Outcome::NotFound, log.clone())),
        10,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("beta", Outcome::NotFound, log.clone())),
        0,
    );

    let collection = chain.route_collection();
    assert_eq!(collection.len(), 2);
    assert!(collection.get("alpha").is_some());
    assert!(collection.get("beta").is_some());
}

#[test]
fn test_warm_up_reaches_every_router() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("a", Outcome::NotFound, log.clone())),
        10,
    );
    chain.add(
        Arc::new(ScriptedRouter::new("b", Outcome::NotFound, log.clone())),
        0,
    );

    let cache_dir = tempfile::tempdir().unwrap();
    chain.warm_up(cache_dir.path());

    let dir = cache_dir.path().display();
    assert_eq!(
        *log.lock().unwrap(),
        vec![format!("a:warm_up:{dir}"), format!("b:warm_up:{dir}")]
    );
}

#[test]
fn test_match_request_passes_request_through() {
    let log = log();
    let chain = ChainRouter::new();
    chain.add(
        Arc::new(ScriptedRouter::new("only", Outcome::Succeed, log.clone())),
        0,
    );

    let request = Request::new("/x").with_method(Method::POST);
    let result = chain.match_request(&request).unwrap();
    assert_eq!(result.route_name(), Some("only"));
}

//! API Gateway entry point.
//!
//! Picks the collection from the request path, pulls key parameters from the
//! configured source, and hands a transport-free [`OperationRequest`] to the
//! dispatcher. Every response, including routing failures, is an envelope.

use crate::{
    collection::Collection,
    config::{KeySource, Settings},
    dispatch::Dispatcher,
    envelope::ResponseEnvelope,
    error::DispatchError,
    observer::{Observer, TracingObserver},
    request::OperationRequest,
    store::Store,
};

use lambda_http::{Body, Error, Request, RequestExt, Response};

/// Collection name reported for requests whose path matches no collection.
pub const UNROUTED: &str = "unrouted";

/// Routes Lambda HTTP events to a [`Dispatcher`].
#[derive(Debug)]
pub struct Gateway<S, O = TracingObserver> {
    dispatcher: Dispatcher<S, O>,
    collections: Vec<Collection>,
    key_source: KeySource,
}

impl<S: Store, O: Observer> Gateway<S, O> {
    /// Serve the collections described by `settings`.
    pub fn new(dispatcher: Dispatcher<S, O>, settings: &Settings) -> Self {
        Self {
            dispatcher,
            collections: settings.collections(),
            key_source: settings.key_source,
        }
    }

    /// The collection whose route is the first matching path segment.
    ///
    /// Segments before the route (an API Gateway stage, say) are skipped.
    pub fn route(&self, path: &str) -> Option<&Collection> {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .find_map(|segment| {
                self.collections
                    .iter()
                    .find(|collection| collection.route == segment)
            })
    }

    /// Lambda handler: one event in, one HTTP response out.
    pub async fn handle(&self, event: Request) -> Result<Response<Body>, Error> {
        let envelope = self.envelope_for(&event).await;
        Ok(envelope.into_response()?)
    }

    /// Serve `event` and return its envelope.
    ///
    /// Requests that never reach a collection are reported to the observer
    /// under the `unrouted` collection name.
    pub async fn envelope_for(&self, event: &Request) -> ResponseEnvelope {
        let path = event.uri().path();
        let method = event.method().as_str();
        let metric_method = method.to_ascii_lowercase();
        let Some(collection) = self.route(path) else {
            tracing::warn!(path, "no collection for path");
            let error = DispatchError::NotFound("Not found".to_string());
            return self.dispatcher.reject(UNROUTED, &metric_method, error);
        };
        let query_parameters = event.query_string_parameters();
        let path_parameters = event.path_parameters();
        let parameter = |name: &str| {
            let from_query = || query_parameters.first(name).map(str::to_string);
            let from_path = || path_parameters.first(name).map(str::to_string);
            match self.key_source {
                KeySource::Query => from_query(),
                KeySource::Path => from_path(),
                KeySource::Any => from_path().or_else(from_query),
            }
        };
        let body: &[u8] = event.body().as_ref();
        match OperationRequest::from_http(method, &collection.key_schema, parameter, Some(body)) {
            Ok(request) => self.dispatcher.dispatch(collection, request).await,
            Err(error) => {
                tracing::error!(
                    collection = %collection.route,
                    method,
                    error = %error,
                    "request could not be mapped to an operation"
                );
                self.dispatcher
                    .reject(&collection.route, &metric_method, error)
            }
        }
    }
}

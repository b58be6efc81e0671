use crate::{
    collection::Collection,
    common::{Record, key::Keys},
    envelope::ResponseEnvelope,
    error::{DispatchError, StoreError},
    numeric,
    observer::{self, Event, Observer, TracingObserver},
    request::{OperationKind, OperationRequest},
    store::{DeleteOutcome, Store},
    write::update_item::SetClause,
};

use serde_json::{Value, json};

/// Serves create/read/update/delete for any [`Collection`] against one [`Store`].
///
/// Stateless between requests: it only holds the store handle and the observer,
/// so one instance can serve overlapping requests.
///
/// ```rust
/// use bookshelf_crud::{collection, dispatch, observer, request, store};
/// use serde_json::json;
///
/// # async fn example() {
/// let reviews = collection::Collection::reviews("Reviews");
/// let store = store::memory::MemoryStore::new().with_table("Reviews", reviews.key_schema.clone());
/// let dispatcher = dispatch::Dispatcher::new(store, observer::NoopObserver);
///
/// let keys = json!({"review_id": "r1"}).as_object().cloned().unwrap_or_default();
/// let envelope = dispatcher
///     .dispatch(&reviews, request::OperationRequest::read_one(keys))
///     .await;
/// assert_eq!(envelope.status_code, 400);
/// # }
/// ```
#[derive(Debug)]
pub struct Dispatcher<S, O = TracingObserver> {
    store: S,
    observer: O,
}

impl<S: Store> Dispatcher<S> {
    /// A dispatcher reporting outcomes through `tracing`.
    pub fn with_tracing(store: S) -> Self {
        Self::new(store, TracingObserver)
    }
}

impl<S: Store, O: Observer> Dispatcher<S, O> {
    /// A dispatcher over `store`, reporting outcomes to `observer`.
    pub fn new(store: S, observer: O) -> Self {
        Self { store, observer }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one request to completion. Every failure becomes an envelope.
    #[tracing::instrument(
        name = "bookshelf_crud.dispatch",
        skip_all,
        fields(collection = %collection.route, operation = %request.kind)
    )]
    pub async fn dispatch(
        &self,
        collection: &Collection,
        request: OperationRequest,
    ) -> ResponseEnvelope {
        let method = request.kind.method();
        match self.execute(collection, request).await {
            Ok(envelope) => {
                self.report(&collection.route, method, &envelope, None);
                envelope
            }
            Err(error) => self.reject(&collection.route, method, error),
        }
    }

    /// Turn `error` into its envelope, reporting the outcome to the observer.
    ///
    /// Callers use this for failures raised before a request reaches
    /// [`Self::dispatch`], such as an unknown route or an unreadable body.
    pub fn reject(
        &self,
        collection: &str,
        method: &str,
        error: DispatchError,
    ) -> ResponseEnvelope {
        let detail = error.to_string();
        let envelope = ResponseEnvelope::from(error);
        self.report(collection, method, &envelope, Some(&detail));
        envelope
    }

    fn report(
        &self,
        collection: &str,
        method: &str,
        envelope: &ResponseEnvelope,
        detail: Option<&str>,
    ) {
        let event = Event {
            collection,
            method,
            status_code: envelope.status_code,
            detail,
        };
        observer::notify(&self.observer, &event);
    }

    async fn execute(
        &self,
        collection: &Collection,
        request: OperationRequest,
    ) -> Result<ResponseEnvelope, DispatchError> {
        match request.kind {
            OperationKind::Create => self.create(collection, required_body(request.body)?).await,
            OperationKind::ReadOne => self.read_one(collection, &request.keys).await,
            OperationKind::ReadAll => self.read_all(collection).await,
            OperationKind::Update => {
                let body = required_body(request.body)?;
                self.update(collection, &request.keys, body).await
            }
            OperationKind::Delete => self.delete(collection, &request.keys).await,
        }
    }

    async fn create(
        &self,
        collection: &Collection,
        body: Record,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let body = numeric::normalize_record(body);
        if let Err(missing) = collection.key_schema.resolve(&body) {
            return Err(DispatchError::BadRequest(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        self.store
            .put(&collection.table_name, body)
            .await
            .map_err(|source| store_failure(collection.failure_message("adding"), source))?;
        Ok(ResponseEnvelope::message(collection.added_message()))
    }

    async fn read_one(
        &self,
        collection: &Collection,
        keys: &Record,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let keys = resolve_keys(collection, keys)?;
        let record = self
            .store
            .get(&collection.table_name, keys)
            .await
            .map_err(|source| store_failure(collection.failure_message("fetching"), source))?;
        match record {
            Some(record) => Ok(ResponseEnvelope::new(
                200,
                Value::Object(numeric::normalize_record(record)),
            )),
            None => Err(DispatchError::NotFound(collection.not_found_message())),
        }
    }

    async fn read_all(&self, collection: &Collection) -> Result<ResponseEnvelope, DispatchError> {
        let records = self
            .store
            .scan(&collection.table_name)
            .await
            .map_err(|source| {
                store_failure(collection.failure_message_plural("fetching"), source)
            })?;
        if records.is_empty() {
            return Err(DispatchError::NotFound(collection.none_found_message()));
        }
        let records = records
            .into_iter()
            .map(|record| Value::Object(numeric::normalize_record(record)))
            .collect();
        Ok(ResponseEnvelope::new(200, Value::Array(records)))
    }

    async fn update(
        &self,
        collection: &Collection,
        keys: &Record,
        body: Record,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let keys = resolve_keys(collection, keys)?;
        let key_fields: Vec<&str> = body
            .keys()
            .map(String::as_str)
            .filter(|name| collection.key_schema.contains(name))
            .collect();
        if !key_fields.is_empty() {
            return Err(DispatchError::BadRequest(format!(
                "Key attributes cannot be updated: {}",
                key_fields.join(", ")
            )));
        }
        let set_clause = SetClause::try_from_fields(numeric::normalize_record(body))?;
        let updated = self
            .store
            .update(&collection.table_name, keys, set_clause)
            .await
            .map_err(|source| store_failure(collection.failure_message("updating"), source))?;
        let payload = json!({
            "message": collection.updated_message(),
            "updated_attributes": numeric::normalize_record(updated),
        });
        Ok(ResponseEnvelope::new(200, payload))
    }

    async fn delete(
        &self,
        collection: &Collection,
        keys: &Record,
    ) -> Result<ResponseEnvelope, DispatchError> {
        let keys = resolve_keys(collection, keys)?;
        let outcome = self
            .store
            .delete(&collection.table_name, keys)
            .await
            .map_err(|source| store_failure(collection.failure_message("deleting"), source))?;
        match outcome {
            DeleteOutcome::Deleted => Ok(ResponseEnvelope::message(collection.deleted_message())),
            DeleteOutcome::Absent => Err(DispatchError::NotFound(collection.not_found_message())),
        }
    }
}

fn required_body(body: Option<Record>) -> Result<Record, DispatchError> {
    body.ok_or_else(|| DispatchError::Unhandled("Request body is required".to_string()))
}

fn resolve_keys(collection: &Collection, keys: &Record) -> Result<Keys<Value>, DispatchError> {
    collection.key_schema.resolve(keys).map_err(|missing| {
        DispatchError::BadRequest(format!(
            "Missing required parameters: {}",
            missing.join(", ")
        ))
    })
}

fn store_failure(context: String, source: StoreError) -> DispatchError {
    DispatchError::Store { context, source }
}

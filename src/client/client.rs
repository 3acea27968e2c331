//! Client over a transport

use serde_json::Value;
use tracing::{debug, warn};

use super::error::{ClientError, GraphqlError};
use super::transport::GraphqlTransport;
use crate::bulk::{BeneficiaryStatus, BulkUpdateRequest, StatusUploadSubmission};
use crate::request::{GraphqlPayload, MutationRequest, QueryRequest, ResponseTags};
use crate::store::{Action, ResponseStore};

/// Sends built requests; never retries
#[derive(Debug, Clone)]
pub struct Client<T> {
    transport: T,
}

impl<T: GraphqlTransport> Client<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run a query and return its `data` object
    pub async fn fetch(&self, request: &QueryRequest) -> Result<Value, ClientError> {
        debug!(target: "spquery::client", entity = %request.entity, dispatch = %request.dispatch, "fetch");
        self.send(&request.payload()).await
    }

    /// Run a query and route its lifecycle through `store`
    ///
    /// The request and result actions are dropped by the store when the
    /// slice is not mounted.
    pub async fn fetch_into(&self, store: &mut ResponseStore, request: &QueryRequest) -> Result<(), ClientError> {
        let tags = request.dispatch.tags();
        store.reduce(&Action::request(&tags));
        let result = self.fetch(request).await;
        record(store, &tags, result).map(|_| ())
    }

    /// Run a mutation and return the operation's result object
    pub async fn mutate(&self, request: &MutationRequest) -> Result<Value, ClientError> {
        debug!(
            target: "spquery::client",
            operation = %request.operation,
            client_mutation_id = %request.client_mutation_id,
            "mutate"
        );
        let data = self.send(&request.payload()).await?;
        Ok(data.get(&request.operation).cloned().unwrap_or(Value::Null))
    }

    /// Run a mutation and route its lifecycle through `store` under the
    /// request's own tags
    pub async fn mutate_into(&self, store: &mut ResponseStore, request: &MutationRequest) -> Result<Value, ClientError> {
        store.reduce(&Action::request(&request.tags));
        let result = self.mutate(request).await;
        record(store, &request.tags, result)
    }

    /// Validate and submit a bulk status change
    pub async fn submit_bulk<I, S>(
        &self,
        ids: I,
        status: Option<BeneficiaryStatus>,
        reason: Option<String>,
        label: &str,
    ) -> Result<Value, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = BulkUpdateRequest::new(ids, status, reason)?;
        let mutation = request.to_mutation(label)?;
        self.mutate(&mutation).await
    }

    /// Validate and submit a status upload
    pub async fn submit_upload(&self, submission: &StatusUploadSubmission, label: &str) -> Result<Value, ClientError> {
        let upload = submission.validate()?;
        let mutation = upload.to_mutation(label)?;
        self.mutate(&mutation).await
    }

    async fn send(&self, payload: &GraphqlPayload) -> Result<Value, ClientError> {
        let response = self.transport.post(payload).await.map_err(|e| {
            warn!(target: "spquery::client", error = %e, "transport failure");
            ClientError::from(e)
        })?;
        if let Some(error) = GraphqlError::from_response(&response) {
            warn!(target: "spquery::client", error = %error, "graphql error");
            return Err(error.into());
        }
        match response.get("data") {
            Some(data) if !data.is_null() => Ok(data.clone()),
            _ => Err(GraphqlError::new("Response carried no data").into()),
        }
    }
}

/// Reduce the outcome of a sent request; validation and build errors never
/// reached the network and leave the slice untouched
fn record(store: &mut ResponseStore, tags: &ResponseTags, result: Result<Value, ClientError>) -> Result<Value, ClientError> {
    match result {
        Ok(data) => {
            store.reduce(&Action::success(tags, data.clone()));
            Ok(data)
        }
        Err(ClientError::Graphql(e)) => {
            store.reduce(&Action::error(tags, &e));
            Err(ClientError::Graphql(e))
        }
        Err(e) => Err(e),
    }
}

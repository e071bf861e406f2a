//! Client side of the backend protocol.

mod http_client;

pub use http_client::HttpClient;

use std::future::Future;
use std::sync::Arc;

use crate::{
    AckResponse, ApiError, CreateCollectionRequest, DeleteCollectionRequest, DeleteRequest,
    DetailsRequest, DetailsResponse, InsertRequest, ResourcesQuery, ResourcesResponse,
    SearchRequest, SearchResponse,
};

/// One async call per backend endpoint.
///
/// `HttpClient` is the production implementation; the store is generic over
/// this trait so tests can substitute an in-process fake.
pub trait VectorBackend: Send + Sync + 'static {
    fn search(
        &self,
        req: SearchRequest,
    ) -> impl Future<Output = Result<SearchResponse, ApiError>> + Send;

    fn insert(&self, req: InsertRequest)
    -> impl Future<Output = Result<AckResponse, ApiError>> + Send;

    fn delete(&self, req: DeleteRequest)
    -> impl Future<Output = Result<AckResponse, ApiError>> + Send;

    fn create_collection(
        &self,
        req: CreateCollectionRequest,
    ) -> impl Future<Output = Result<AckResponse, ApiError>> + Send;

    fn delete_collection(
        &self,
        req: DeleteCollectionRequest,
    ) -> impl Future<Output = Result<AckResponse, ApiError>> + Send;

    fn details(
        &self,
        req: DetailsRequest,
    ) -> impl Future<Output = Result<DetailsResponse, ApiError>> + Send;

    fn resources(
        &self,
        query: ResourcesQuery,
    ) -> impl Future<Output = Result<ResourcesResponse, ApiError>> + Send;
}

impl<B: VectorBackend> VectorBackend for Arc<B> {
    fn search(
        &self,
        req: SearchRequest,
    ) -> impl Future<Output = Result<SearchResponse, ApiError>> + Send {
        (**self).search(req)
    }

    fn insert(
        &self,
        req: InsertRequest,
    ) -> impl Future<Output = Result<AckResponse, ApiError>> + Send {
        (**self).insert(req)
    }

    fn delete(
        &self,
        req: DeleteRequest,
    ) -> impl Future<Output = Result<AckResponse, ApiError>> + Send {
        (**self).delete(req)
    }

    fn create_collection(
        &self,
        req: CreateCollectionRequest,
    ) -> impl Future<Output = Result<AckResponse, ApiError>> + Send {
        (**self).create_collection(req)
    }

    fn delete_collection(
        &self,
        req: DeleteCollectionRequest,
    ) -> impl Future<Output = Result<AckResponse, ApiError>> + Send {
        (**self).delete_collection(req)
    }

    fn details(
        &self,
        req: DetailsRequest,
    ) -> impl Future<Output = Result<DetailsResponse, ApiError>> + Send {
        (**self).details(req)
    }

    fn resources(
        &self,
        query: ResourcesQuery,
    ) -> impl Future<Output = Result<ResourcesResponse, ApiError>> + Send {
        (**self).resources(query)
    }
}

//! OpenAPI documentation aggregator.
//!
//! Collects the `#[utoipa::path]`-annotated handlers and `ToSchema` types
//! into one OpenAPI document, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "docrag API",
        version = "0.1.0",
        description = "Document upload, vector search, and retrieval-augmented chat over pgvector.",
    ),
    tags(
        (name = "Health", description = "Database reachability"),
        (name = "Files", description = "Upload, list, and delete indexed documents"),
        (name = "Retrieval", description = "Vector search and retrieval-augmented chat"),
    ),
    paths(
        crate::api::health::health,
        crate::api::files::upload,
        crate::api::files::list_files,
        crate::api::files::delete_file,
        crate::api::search::search,
        crate::api::chat::chat,
    ),
    components(schemas(
        crate::api::ErrorBody,
        crate::api::health::HealthResponse,
        crate::api::files::FileListResponse,
        crate::api::search::SearchRequest,
        crate::api::search::SearchResponse,
        crate::api::chat::ChatRequest,
        crate::api::chat::ChatResponse,
        crate::pipeline::UploadSummary,
        crate::pipeline::PipelineStep,
        crate::vector_store::FileRecord,
        crate::vector_store::SearchHit,
        crate::vector_store::TableInfo,
    ))
)]
pub struct ApiDoc;

//! HTTP handlers for proposal endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::dto::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::{
    CalculateProposalHandler, CalculateProposalQuery, ExportProposalCommand,
    ExportProposalHandler, GetProposalHandler, GetProposalQuery, ListProposalsHandler,
    ListProposalsQuery, SaveProposalCommand, SaveProposalHandler,
};
use crate::domain::foundation::{ProposalId, Timestamp};
use crate::domain::pricing::ProposalInput;
use crate::domain::proposal::ProposalError;
use crate::ports::ExportFormat;

use super::dto::{ExportQuery, ProposalListResponse, SaveProposalRequest, SaveProposalResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct ProposalAppState {
    calculate_handler: Arc<CalculateProposalHandler>,
    save_handler: Arc<SaveProposalHandler>,
    get_handler: Arc<GetProposalHandler>,
    list_handler: Arc<ListProposalsHandler>,
    export_handler: Arc<ExportProposalHandler>,
}

impl ProposalAppState {
    pub fn new(
        calculate_handler: Arc<CalculateProposalHandler>,
        save_handler: Arc<SaveProposalHandler>,
        get_handler: Arc<GetProposalHandler>,
        list_handler: Arc<ListProposalsHandler>,
        export_handler: Arc<ExportProposalHandler>,
    ) -> Self {
        Self {
            calculate_handler,
            save_handler,
            get_handler,
            list_handler,
            export_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/proposals/calculate - Price an input
pub async fn calculate_proposal(
    State(state): State<ProposalAppState>,
    Json(input): Json<ProposalInput>,
) -> Response {
    match state.calculate_handler.handle(CalculateProposalQuery { input }) {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(e) => handle_proposal_error(e),
    }
}

/// POST /api/proposals - Save a proposal for the caller
pub async fn save_proposal(
    State(state): State<ProposalAppState>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SaveProposalRequest>,
) -> Response {
    let cmd = SaveProposalCommand {
        user_id: user.id,
        inputs: req.inputs,
        client_outputs: req.outputs,
    };

    match state.save_handler.handle(cmd).await {
        Ok(result) => (StatusCode::CREATED, Json(SaveProposalResponse::from(result))).into_response(),
        Err(e) => handle_proposal_error(e),
    }
}

/// GET /api/proposals - List the caller's proposals
pub async fn list_proposals(
    State(state): State<ProposalAppState>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match state.list_handler.handle(ListProposalsQuery { user_id: user.id }).await {
        Ok(proposals) => (StatusCode::OK, Json(ProposalListResponse { proposals })).into_response(),
        Err(e) => handle_proposal_error(e),
    }
}

/// GET /api/proposals/:id - One of the caller's proposals
pub async fn get_proposal(
    State(state): State<ProposalAppState>,
    RequireAuth(user): RequireAuth,
    Path(proposal_id): Path<String>,
) -> Response {
    let proposal_id = match proposal_id.parse::<ProposalId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid proposal ID")),
            )
                .into_response()
        }
    };

    let query = GetProposalQuery {
        proposal_id,
        user_id: user.id,
    };

    match state.get_handler.handle(query).await {
        Ok(proposal) => (StatusCode::OK, Json(proposal)).into_response(),
        Err(e) => handle_proposal_error(e),
    }
}

/// POST /api/proposals/export?format=markdown|html|pdf - Download a proposal document
pub async fn export_proposal(
    State(state): State<ProposalAppState>,
    Query(query): Query<ExportQuery>,
    Json(input): Json<ProposalInput>,
) -> Response {
    let format = match query.format.as_deref().map(str::parse::<ExportFormat>) {
        None => ExportFormat::default(),
        Some(Ok(format)) => format,
        Some(Err(e)) => {
            return (StatusCode::BAD_REQUEST, Json(ErrorResponse::bad_request(e.to_string())))
                .into_response()
        }
    };

    let cmd = ExportProposalCommand {
        input,
        format,
        issued_on: Timestamp::now(),
    };

    match state.export_handler.handle(cmd).await {
        Ok(doc) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, doc.content_type),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{}\"", doc.filename),
                ),
            ],
            doc.content,
        )
            .into_response(),
        Err(e) => handle_proposal_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn handle_proposal_error(error: ProposalError) -> Response {
    let code = error.code().to_string();
    match error {
        ProposalError::NotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Proposal", &id.to_string())),
        )
            .into_response(),
        ProposalError::ExportValidation(problems) => (
            StatusCode::BAD_REQUEST,
            Json(
                ErrorResponse::new(code, problems.join(" "))
                    .with_details(serde_json::json!(problems)),
            ),
        )
            .into_response(),
        ProposalError::Configuration(msg) => {
            tracing::error!(error = %msg, "Rate table cannot price request");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(code, msg))).into_response()
        }
        ProposalError::Document(msg) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse::new(code, format!("Document export failed: {}", msg))),
        )
            .into_response(),
        ProposalError::Infrastructure(msg) => {
            tracing::error!(error = %msg, "Proposal storage failed");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::internal(msg))).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let response = handle_proposal_error(ProposalError::NotFound(ProposalId::new()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn export_validation_maps_to_400() {
        let response = handle_proposal_error(ProposalError::ExportValidation(vec![
            "Project name is required.".to_string(),
        ]));
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn configuration_error_maps_to_500() {
        let response = handle_proposal_error(ProposalError::configuration(
            "Missing pricing base for discipline: building",
        ));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn document_error_maps_to_503() {
        let response = handle_proposal_error(ProposalError::document("pandoc not found"));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}

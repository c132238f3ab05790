// src/middleware/tenancy.rs

use axum::{
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use uuid::Uuid;
use crate::common::error::ApiError; // Usamos o nosso ApiError para rejeição

// O nome do nosso cabeçalho HTTP customizado
const TENANT_ID_HEADER: &str = "x-tenant-id";

// O restaurante (tenant) cujos relatórios estão sendo pedidos.
// A resolução de sessão e permissões fica com o gateway; aqui só lemos o cabeçalho.
#[derive(Debug, Clone)]
pub struct TenantContext(pub Uuid);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(TENANT_ID_HEADER).ok_or(ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "O cabeçalho X-Tenant-ID é obrigatório.".to_string(),
            details: None,
        })?;

        let value_str = value.to_str().map_err(|_| ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "Cabeçalho X-Tenant-ID contém caracteres inválidos.".to_string(),
            details: None,
        })?;

        let tenant_id = Uuid::parse_str(value_str).map_err(|_| ApiError {
            status: StatusCode::BAD_REQUEST,
            error: "Cabeçalho X-Tenant-ID inválido (não é um UUID).".to_string(),
            details: None,
        })?;

        Ok(TenantContext(tenant_id))
    }
}

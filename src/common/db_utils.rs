use sqlx::{Postgres, Transaction};

use crate::common::error::AppError;
use crate::config::AppState;
use crate::middleware::tenancy::TenantContext;

// REPEATABLE READ: todas as consultas da transação enxergam o mesmo snapshot.
// Em READ COMMITTED (padrão do Postgres) cada SELECT veria um estado diferente.
const SNAPSHOT_MODE: &str = "SET TRANSACTION ISOLATION LEVEL REPEATABLE READ, READ ONLY";

// ---
// Helper RLS: A "Chave" para o Banco de Dados
// ---
/// Abre uma transação somente-leitura em REPEATABLE READ e define `app.tenant_id` para o RLS.
/// Todas as leituras de um relatório passam por ela, então vendas, linhas e o mês corrente
/// vêm do mesmo snapshot.
pub(crate) async fn begin_tenant_snapshot(
    app_state: &AppState,
    tenant_ctx: &TenantContext,
) -> Result<Transaction<'static, Postgres>, AppError> {
    let mut tx = app_state.db_pool.begin().await?;

    sqlx::query(SNAPSHOT_MODE)
        .execute(&mut *tx)
        .await?;

    // `true` = vale só até o fim da transação
    sqlx::query("SELECT set_config('app.tenant_id', $1, true)")
        .bind(tenant_ctx.0.to_string())
        .execute(&mut *tx)
        .await?;

    Ok(tx)
}

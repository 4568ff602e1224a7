//! Prompt to dataset: credit check, backend call, sampling.

use crate::decode::dotmint_from_image;
use crate::renderer::RenderError;
use dotmint_core::credits::{AuthStatus, CreditError, CreditLedger};
use dotmint_core::generation::{GenerationError, GenerationRequest, GenerationService};
use dotmint_core::sample::DOTMINT_GRID;
use dotmint_core::storage::{UserRecord, UserStore};
use dotmint_core::stroke::Dot;
use thiserror::Error;

/// Errors from the generation flow.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Credit(#[from] CreditError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Result of a successful generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub dots: Vec<Dot>,
    /// The user after the debit.
    pub user: UserRecord,
}

/// Run one generation for the signed-in user.
///
/// Nothing is charged when the request is invalid or the user lacks
/// credits. The caller loads `dots` into its session; on error the session
/// is left untouched.
pub async fn generate_dotmint<S, G>(
    ledger: &CreditLedger<S>,
    service: &G,
    auth: &AuthStatus,
    request: &GenerationRequest,
) -> Result<Generated, GenerateError>
where
    S: UserStore,
    G: GenerationService + ?Sized,
{
    let address = auth.address().ok_or(CreditError::NotSignedIn)?;
    request.validate()?;

    let user = ledger.ensure_user(address).await?;
    let user = ledger.debit_generation(&user).await?;

    log::info!(
        "Generating dotmint with {} model for {}",
        request.model().endpoint(),
        user.id
    );
    log::debug!("Prompt: {}", request.prompt_text());
    let image = service.generate(request).await?;
    let dots = dotmint_from_image(&image, DOTMINT_GRID)?;
    Ok(Generated { dots, user })
}

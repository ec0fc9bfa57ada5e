//! Route table and handlers.
//!
//! Reads that fail in the store surface as the 500 page. Mutations never do:
//! a store failure there becomes a failure flash and a redirect to the list.

use std::path::Path;

use axum::Router;
use axum::extract::{Extension, Form, Path as UrlPath, State};
use axum::handler::HandlerWithoutStateExt;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use kontak_core::{
    ContactFields, ContactForm, ContactId, Flash, ValidationErrors, Validator, check_unique_name,
    messages,
};
use serde::Deserialize;
use tower_http::services::ServeDir;

use crate::Result;
use crate::middleware::Session;
use crate::state::AppState;
use crate::views::contact_edit_path;

/// Body of the not-found page.
pub const NOT_FOUND_BODY: &str = "<h1>404</h1>";

/// Where mutations redirect on completion.
pub const CONTACT_LIST_PATH: &str = "/contact";

/// Build the application router.
///
/// Anything the route table does not match is looked up under `public_dir`,
/// and anything missing there gets the 404 page.
pub fn router(state: AppState, public_dir: &Path) -> Router {
    let assets = ServeDir::new(public_dir)
        .call_fallback_on_method_not_allowed(true)
        .not_found_service(not_found.into_service());

    Router::new()
        .route("/", get(home))
        .route(
            "/contact",
            get(contact_list)
                .post(create_contact)
                .put(update_contact)
                .delete(delete_contact),
        )
        .route("/contact/add", get(add_form))
        .route("/contact/edit/{name}", get(edit_form))
        .route("/contact/{name}", get(contact_detail))
        .route("/product", get(product))
        .route("/about", get(about))
        .method_not_allowed_fallback(not_found)
        .fallback_service(assets)
        .with_state(state)
}

async fn not_found() -> (StatusCode, Html<&'static str>) {
    (StatusCode::NOT_FOUND, Html(NOT_FOUND_BODY))
}

// ============================================================================
// Static pages
// ============================================================================

async fn home(State(state): State<AppState>) -> Result<Html<String>> {
    state.views.home()
}

async fn product(State(state): State<AppState>) -> Result<Html<String>> {
    state.views.product()
}

async fn about(State(state): State<AppState>) -> Result<Html<String>> {
    state.views.about()
}

// ============================================================================
// Reads
// ============================================================================

async fn contact_list(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
) -> Result<Html<String>> {
    let contacts = state.store.find_all().await?;
    let flash = session.take_flash().await;
    state
        .views
        .contact_list(&contacts, flash.as_ref().and_then(Flash::as_message))
}

async fn add_form(State(state): State<AppState>) -> Result<Html<String>> {
    state.views.contact_add(&[])
}

async fn edit_form(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    UrlPath(name): UrlPath<String>,
) -> Result<Response> {
    let Some(contact) = state.store.find_by_name(&name).await? else {
        tracing::debug!(%name, "Edit requested for unknown contact");
        return Ok(not_found().await.into_response());
    };
    let flash = session.take_flash().await;
    let (errors, msg) = match &flash {
        Some(flash) => (flash.field_errors(), flash.as_message()),
        None => (&[][..], None),
    };
    Ok(state
        .views
        .contact_edit(&contact, errors, msg)?
        .into_response())
}

async fn contact_detail(
    State(state): State<AppState>,
    UrlPath(name): UrlPath<String>,
) -> Result<Response> {
    match state.store.find_by_name(&name).await? {
        Some(contact) => Ok(state.views.contact_detail(&contact)?.into_response()),
        None => {
            tracing::debug!(%name, "Detail requested for unknown contact");
            Ok(not_found().await.into_response())
        }
    }
}

// ============================================================================
// Mutations
// ============================================================================

/// Body of the edit form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct EditContactForm {
    #[serde(rename = "_id")]
    id: String,
    #[serde(rename = "oldName")]
    old_name: String,
    name: String,
    email: String,
    nohp: String,
}

impl EditContactForm {
    fn contact_form(&self) -> ContactForm {
        ContactForm::new(&self.name, &self.email, &self.nohp)
    }
}

/// Body of the delete form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct DeleteContactForm {
    name: String,
}

/// Runs the field rules and the name uniqueness rule, collecting every
/// failure.
///
/// The uniqueness lookup runs whenever a name was given, so a taken name is
/// reported next to failures in the other fields. `own_name` is the record's
/// current name when editing.
async fn validate_contact(
    state: &AppState,
    form: &ContactForm,
    own_name: Option<&str>,
) -> kontak_storage::Result<std::result::Result<ContactFields, ValidationErrors>> {
    let checked = Validator::contact().validate(form);
    let name = form.sanitized().name;
    if name.is_empty() {
        return Ok(checked);
    }

    let existing = state.store.find_by_name(&name).await?;
    let Some(taken) = check_unique_name(existing.as_ref(), &name, own_name) else {
        return Ok(checked);
    };
    tracing::debug!(%name, "Name already used by another contact");

    let mut errors = ValidationErrors::from(taken);
    if let Err(others) = checked {
        for error in others.into_vec() {
            errors.push(error);
        }
    }
    Ok(Err(errors))
}

async fn create_contact(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<ContactForm>,
) -> Result<Response> {
    let fields = match validate_contact(&state, &form, None).await {
        Ok(Ok(fields)) => fields,
        Ok(Err(errors)) => {
            tracing::debug!(%errors, "Rejected new contact");
            return Ok(state.views.contact_add(errors.as_slice())?.into_response());
        }
        Err(e) => return Ok(store_failure(&session, e).await),
    };

    match state.store.insert(fields).await {
        Ok(contact) => {
            tracing::info!(name = %contact.name, id = %contact.id, "Contact added");
            session.set_flash(Flash::message(messages::CONTACT_ADDED)).await;
            Ok(Redirect::to(CONTACT_LIST_PATH).into_response())
        }
        Err(e) => Ok(store_failure(&session, e).await),
    }
}

async fn update_contact(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<EditContactForm>,
) -> Result<Response> {
    let back_to_form = Redirect::to(&contact_edit_path(form.old_name.trim()));

    let fields = match validate_contact(&state, &form.contact_form(), Some(&form.old_name)).await {
        Ok(Ok(fields)) => fields,
        Ok(Err(errors)) => {
            tracing::debug!(old_name = %form.old_name, %errors, "Rejected contact edit");
            session.set_flash(errors).await;
            return Ok(back_to_form.into_response());
        }
        Err(e) => return Ok(store_failure(&session, e).await),
    };

    let id = match ContactId::parse(&form.id) {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(error = %e, "Edit submitted without a usable id");
            session.set_flash(Flash::message(messages::CONTACT_NOT_FOUND)).await;
            return Ok(Redirect::to(CONTACT_LIST_PATH).into_response());
        }
    };

    let flash = match state.store.update_by_id(id, fields).await {
        Ok(Some(contact)) => {
            tracing::info!(name = %contact.name, %id, "Contact updated");
            messages::CONTACT_UPDATED
        }
        Ok(None) => {
            tracing::debug!(%id, "Edit submitted for a contact that no longer exists");
            messages::CONTACT_NOT_FOUND
        }
        Err(e) => return Ok(store_failure(&session, e).await),
    };
    session.set_flash(Flash::message(flash)).await;
    Ok(Redirect::to(CONTACT_LIST_PATH).into_response())
}

async fn delete_contact(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Form(form): Form<DeleteContactForm>,
) -> Response {
    let flash = match state.store.delete_by_name(&form.name).await {
        Ok(true) => {
            tracing::info!(name = %form.name, "Contact deleted");
            messages::CONTACT_DELETED
        }
        Ok(false) => messages::CONTACT_NOT_FOUND,
        Err(e) => return store_failure(&session, e).await,
    };
    session.set_flash(Flash::message(flash)).await;
    Redirect::to(CONTACT_LIST_PATH).into_response()
}

async fn store_failure(session: &Session, error: kontak_storage::Error) -> Response {
    tracing::error!(%error, "Contact store failed during a mutation");
    session
        .set_flash(Flash::message(messages::STORE_FAILURE))
        .await;
    Redirect::to(CONTACT_LIST_PATH).into_response()
}

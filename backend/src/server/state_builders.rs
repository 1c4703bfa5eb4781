//! Builders for HTTP state and optional demonstration data.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use library_backend::domain::ports::{CreateBookRequest, NewEmployee};
use library_backend::domain::{
    BookDraft, CategoryDraft, ClientDraft, EmployeeProfile, Error, Password,
};
use library_backend::inbound::http::state::HttpState;
use library_backend::outbound::credentials::BcryptCredentialHasher;

use super::ServerConfig;

/// Wire the services over the configured store with the system clock and
/// bcrypt hashing.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    web::Data::new(HttpState::from_store(
        config.store.clone(),
        Arc::new(BcryptCredentialHasher::new(config.bcrypt_cost)),
        Arc::new(mockable::DefaultClock),
    ))
}

const DEMO_CATEGORIES: [(&str, &str); 3] = [
    ("Romance", "Narrativas longas em prosa"),
    ("Poesia", "Obras em verso"),
    ("Drama", "Textos para teatro"),
];

const DEMO_BOOKS: [(&str, &str, i32, usize); 4] = [
    ("Dom Casmurro", "Machado de Assis", 1899, 0),
    ("Memórias Póstumas de Brás Cubas", "Machado de Assis", 1881, 0),
    ("Marília de Dirceu", "Tomás Antônio Gonzaga", 1792, 1),
    ("Auto da Compadecida", "Ariano Suassuna", 1955, 2),
];

fn invalid_seed(err: impl std::fmt::Display) -> Error {
    Error::internal(format!("demo data is invalid: {err}"))
}

/// Populate an empty store with a few categories, books, one client and one
/// employee (`admin@library.local` / `admin`).
///
/// # Errors
/// Propagates the first service error.
pub(crate) async fn seed_demo_data(state: &HttpState) -> Result<(), Error> {
    let mut category_ids = Vec::with_capacity(DEMO_CATEGORIES.len());
    for (name, description) in DEMO_CATEGORIES {
        let category = state
            .categories
            .create_category(CategoryDraft {
                name: name.to_owned(),
                description: Some(description.to_owned()),
            })
            .await?;
        category_ids.push(category.id());
    }

    for (title, author, year, category) in DEMO_BOOKS {
        state
            .books
            .create_book(CreateBookRequest {
                draft: BookDraft {
                    title: title.to_owned(),
                    author: author.to_owned(),
                    publication_year: Some(year),
                },
                category_ids: category_ids.get(category).copied().into_iter().collect(),
            })
            .await?;
    }

    state
        .clients
        .create_client(ClientDraft {
            name: "Bento Santiago".to_owned(),
            national_id: "12345678901".to_owned(),
            phone: None,
            address: Some("Rua de Mata-cavalos, Rio de Janeiro".to_owned()),
        })
        .await?;

    state
        .employees
        .create_employee(NewEmployee {
            profile: EmployeeProfile::new("Administrador", "admin@library.local")
                .map_err(invalid_seed)?,
            password: Password::new("admin").map_err(invalid_seed)?,
        })
        .await?;

    info!(
        categories = DEMO_CATEGORIES.len(),
        books = DEMO_BOOKS.len(),
        "demo data loaded"
    );
    Ok(())
}

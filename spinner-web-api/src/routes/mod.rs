use rocket::fairing::AdHoc;

pub mod admin;
pub mod auth;
pub mod spinner;

pub fn mount() -> AdHoc {
    AdHoc::on_ignite("Attaching Routes", |rocket| async {
        rocket.mount(
            "/",
            routes![
                admin::index,
                admin::destroy,
                auth::login,
                spinner::store,
                spinner::total
            ],
        )
    })
}

use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct AppState {
    pub orm: DatabaseConnection,
    pub testing: bool,
}

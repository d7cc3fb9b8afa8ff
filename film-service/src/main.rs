use std::sync::Arc;

use film_service::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_tracing(&config)?;

    let pool = database::connect(&config.database).await?;
    let registry = Arc::new(CodecRegistry::standard());
    tracing::info!(formats = ?registry.formats(), "codecs registered");

    let service = FilmService::new(
        SqliteFilmStore::new(pool),
        registry,
        config.service.base_path.clone(),
    );

    Server::new(config).serve(router(service)).await
}

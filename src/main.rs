use bookshelf_crud::{config::Settings, dispatch::Dispatcher, gateway::Gateway, store::dynamo::DynamoStore};
use lambda_http::{Error, run, service_fn, tracing};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    tracing::info!(
        books_table = %settings.books_table,
        reviews_table = %settings.reviews_table,
        key_source = ?settings.key_source,
        consistent_read = settings.consistent_read,
        "starting"
    );

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = DynamoStore::new(aws_sdk_dynamodb::Client::new(&config))
        .with_consistent_read(settings.consistent_read);
    let gateway = Gateway::new(Dispatcher::with_tracing(store), &settings);

    run(service_fn(|event| gateway.handle(event))).await
}

use riff::error::AppError;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    riff::app::run().await
}

use promopostbot_rs::BoxError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), BoxError> {
    promopostbot_rs::run().await
}

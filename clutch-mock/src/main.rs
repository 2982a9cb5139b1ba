use clutch_mock::MockState;
use shared::{Car, Property};
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clutch_mock=info,tower_http=info".into()),
        )
        .init();

    dotenvy::dotenv().ok();

    let port: u16 = std::env::var("MOCK_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(4000);

    let mut state = MockState::new()
        .with_cars(demo_cars())
        .with_properties(demo_properties());
    if let Ok(token) = std::env::var("MOCK_TOKEN") {
        state = state.with_token(token);
    }

    clutch_mock::serve(Arc::new(state), SocketAddr::from(([127, 0, 0, 1], port))).await
}

fn demo_cars() -> Vec<Car> {
    vec![
        Car::new("car-1").with_rank(0).with_brand("Toyota", "Corolla"),
        Car::new("car-2").with_rank(1).with_brand("Hyundai", "Tucson"),
        Car::new("car-3").with_rank(2).with_brand("Kia", "Sportage"),
        Car::new("car-4").with_brand("Toyota", "Land Cruiser"),
    ]
}

fn demo_properties() -> Vec<Property> {
    vec![
        Property::new("prop-1").with_rank(0).with_title("Sea view villa", "Alexandria"),
        Property::new("prop-2").with_rank(1).with_title("Garden duplex", "New Cairo"),
        Property::new("prop-3").with_rank(2).with_title("Studio apartment", "Zamalek"),
    ]
}

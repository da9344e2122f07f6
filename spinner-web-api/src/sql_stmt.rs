// Numeric on Postgres, real on sqlite; both decode as Decimal.
pub const TOTAL_OFFERS: &str = r#"SELECT COALESCE(SUM(spinners.get_offer), 0.0) AS total_offers
    FROM spinners"#;

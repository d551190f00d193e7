use chrono::{TimeZone, Utc};
use std::collections::HashSet;
use wallet_portfolio_core::errors::CoreError;
use wallet_portfolio_core::models::address::Address;
use wallet_portfolio_core::models::analysis::RiskLevel;
use wallet_portfolio_core::models::holding::{Holding, RawHolding};
use wallet_portfolio_core::models::settings::Settings;
use wallet_portfolio_core::models::wallet::{HoldingsPayload, RawWalletData, Wallet};

const ADDR: &str = "0xABCDEF0123456789ABCDEF0123456789ABCDEF01";

fn addr(s: &str) -> Address {
    Address::parse_hex(s).unwrap()
}

// ═══════════════════════════════════════════════════════════════════
//  Address
// ═══════════════════════════════════════════════════════════════════

mod address {
    use super::*;

    #[test]
    fn accepts_mixed_case_hex() {
        let a = addr(ADDR);
        assert_eq!(a.as_str(), ADDR);
    }

    #[test]
    fn trims_whitespace() {
        let a = addr(&format!("  {ADDR}\n"));
        assert_eq!(a.as_str(), ADDR);
    }

    #[test]
    fn rejects_41_characters() {
        let err = Address::parse_hex("0xABCDEF0123456789ABCDEF0123456789ABCDEF0").unwrap_err();
        assert!(matches!(err, CoreError::InvalidFormat(_)));
    }

    #[test]
    fn rejects_43_characters() {
        let err = Address::parse_hex(&format!("{ADDR}2")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidFormat(_)));
    }

    #[test]
    fn rejects_missing_prefix() {
        assert!(Address::parse_hex("ABCDEF0123456789ABCDEF0123456789ABCDEF0123").is_err());
    }

    #[test]
    fn rejects_non_hex_digit() {
        assert!(Address::parse_hex("0xGBCDEF0123456789ABCDEF0123456789ABCDEF01").is_err());
    }

    #[test]
    fn rejects_empty() {
        assert!(Address::parse_hex("").is_err());
    }

    #[test]
    fn equality_is_case_insensitive() {
        assert_eq!(addr(ADDR), addr(&ADDR.to_lowercase()));
    }

    #[test]
    fn hash_is_case_insensitive() {
        let mut set = HashSet::new();
        set.insert(addr(ADDR));
        set.insert(addr(&ADDR.to_lowercase()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn matches_raw_string_ignoring_case() {
        assert!(addr(ADDR).matches(&ADDR.to_lowercase()));
        assert!(!addr(ADDR).matches("0x0000000000000000000000000000000000000000"));
    }

    #[test]
    fn short_form() {
        assert_eq!(addr(ADDR).short(), "0xABCD…EF01");
    }

    #[test]
    fn from_str() {
        let a: Address = ADDR.parse().unwrap();
        assert_eq!(a, addr(ADDR));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&addr(ADDR)).unwrap();
        assert_eq!(json, format!("\"{ADDR}\""));
    }
}

// ═══════════════════════════════════════════════════════════════════
//  Holdings & Wallet
// ═══════════════════════════════════════════════════════════════════

mod wallet {
    use super::*;

    fn sample_wallet() -> Wallet {
        Wallet {
            address: addr(ADDR),
            holdings: vec![
                Holding {
                    symbol: "HYPE".into(),
                    name: "Hyperliquid".into(),
                    balance: "12.345678901234567890".into(),
                    decimals: 18,
                    contract_address: None,
                    price: Some(25.5),
                    usd_value: 314.814814,
                    price_change_24h: Some(-3.2),
                    is_native: true,
                },
                Holding {
                    symbol: "USDC".into(),
                    name: "USD Coin".into(),
                    balance: "100".into(),
                    decimals: 6,
                    contract_address: Some("0x1111111111111111111111111111111111111111".into()),
                    price: None,
                    usd_value: 0.0,
                    price_change_24h: None,
                    is_native: false,
                },
            ],
            total_value: 314.814814,
            token_count: 2,
            last_updated: Some(Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap()),
        }
    }

    #[test]
    fn json_round_trip_is_field_for_field() {
        let wallets = vec![sample_wallet()];
        let json = serde_json::to_string(&wallets).unwrap();
        let back: Vec<Wallet> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wallets);
    }

    #[test]
    fn balance_string_survives_round_trip_exactly() {
        let json = serde_json::to_string(&sample_wallet()).unwrap();
        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(back.holdings[0].balance, "12.345678901234567890");
    }

    #[test]
    fn top_and_native_holding() {
        let w = sample_wallet();
        assert_eq!(w.top_holding().unwrap().symbol, "HYPE");
        assert_eq!(w.native_holding().unwrap().symbol, "HYPE");
    }

    #[test]
    fn optional_fields_default_when_missing() {
        let json = format!(
            r#"{{"address":"{ADDR}","holdings":[{{"symbol":"X","name":"X","balance":"1","decimals":18,"price":null,"usd_value":0.0}}],"total_value":0.0,"token_count":1}}"#
        );
        let w: Wallet = serde_json::from_str(&json).unwrap();
        assert!(w.last_updated.is_none());
        assert!(!w.holdings[0].is_native);
        assert!(w.holdings[0].contract_address.is_none());
    }

    #[test]
    fn raw_holding_constructors() {
        let t = RawHolding::token("USDC", "5", 6, Some(1.0));
        assert_eq!(t.name, "USDC");
        assert!(!t.is_native);
        let n = RawHolding::native("HYPE", "Hyperliquid", "2", None).with_usd_value(50.0);
        assert!(n.is_native);
        assert_eq!(n.usd_value, Some(50.0));
    }

    #[test]
    fn payload_shape_accessors() {
        let data = RawWalletData::valued(addr(ADDR), vec![RawHolding::token("A", "1", 18, None)], 10.0);
        assert!(data.payload.is_valued());
        assert_eq!(data.payload.holdings().len(), 1);

        let data = RawWalletData::raw(addr(ADDR), vec![]);
        assert!(matches!(data.payload, HoldingsPayload::Raw { .. }));
        assert!(data.payload.holdings().is_empty());
    }
}

// ═══════════════════════════════════════════════════════════════════
//  RiskLevel & Settings
// ═══════════════════════════════════════════════════════════════════

mod misc {
    use super::*;

    #[test]
    fn risk_level_display() {
        assert_eq!(RiskLevel::Low.to_string(), "Low");
        assert_eq!(RiskLevel::Medium.to_string(), "Medium");
        assert_eq!(RiskLevel::High.to_string(), "High");
    }

    #[test]
    fn settings_defaults() {
        let s = Settings::default();
        assert_eq!(s.storage_key, "wallets");
        assert_eq!(s.alias_suffix, ".hl");
        assert_eq!(s.request_timeout_secs, 30);
        assert_eq!(s.market_top_limit, 10);
    }

    #[test]
    fn settings_from_partial_json() {
        let s = Settings::from_json(r#"{"api_base_url":"https://api.example.com/","market_top_limit":25}"#)
            .unwrap();
        assert_eq!(s.api_base_url, "https://api.example.com");
        assert_eq!(s.market_top_limit, 25);
        assert_eq!(s.native_symbol, "HYPE");
    }

    #[test]
    fn settings_from_invalid_json() {
        assert!(matches!(
            Settings::from_json("{"),
            Err(CoreError::Deserialization(_))
        ));
    }

    #[test]
    fn settings_with_base_url_strips_slash() {
        assert_eq!(
            Settings::with_base_url("http://127.0.0.1:9000/").api_base_url,
            "http://127.0.0.1:9000"
        );
    }
}

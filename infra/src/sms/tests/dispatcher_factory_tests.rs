use er_shared::config::{TwilioConfig, VonageConfig};
use er_shared::{Environment, SmsConfig, SmsProviderKind};

use crate::sms::create_dispatcher;
use crate::InfrastructureError;

fn twilio() -> TwilioConfig {
    TwilioConfig {
        account_sid: "AC0123456789".to_string(),
        auth_token: "token".to_string(),
        from_number: "+15005550006".to_string(),
        base_url: "https://api.twilio.com".to_string(),
    }
}

fn vonage() -> VonageConfig {
    VonageConfig {
        api_key: "key".to_string(),
        api_secret: "secret".to_string(),
        from_number: "EscrowReno".to_string(),
        base_url: "https://rest.nexmo.com".to_string(),
    }
}

#[test]
fn test_channels_follow_configured_order() {
    let config = SmsConfig {
        channels: vec![SmsProviderKind::Vonage, SmsProviderKind::Twilio],
        twilio: Some(twilio()),
        vonage: Some(vonage()),
        ..SmsConfig::default()
    };

    let dispatcher = create_dispatcher(&config, Environment::Production).unwrap();
    assert_eq!(dispatcher.channel_names(), vec!["Vonage", "Twilio"]);
}

#[test]
fn test_missing_credentials_are_skipped() {
    let config = SmsConfig {
        twilio: Some(twilio()),
        ..SmsConfig::default()
    };

    let dispatcher = create_dispatcher(&config, Environment::Production).unwrap();
    assert_eq!(dispatcher.channel_names(), vec!["Twilio"]);
}

#[test]
fn test_development_falls_back_to_mock() {
    let dispatcher = create_dispatcher(&SmsConfig::default(), Environment::Development).unwrap();
    assert_eq!(dispatcher.channel_names(), vec!["mock"]);
}

#[test]
fn test_production_without_providers_fails() {
    let result = create_dispatcher(&SmsConfig::default(), Environment::Production);
    assert!(matches!(result, Err(InfrastructureError::Config(_))));
}

#[test]
fn test_mock_channel_rejected_in_production() {
    let config = SmsConfig {
        channels: vec![SmsProviderKind::Mock],
        ..SmsConfig::default()
    };
    assert!(create_dispatcher(&config, Environment::Production).is_err());
    assert!(create_dispatcher(&config, Environment::Staging).is_ok());
}

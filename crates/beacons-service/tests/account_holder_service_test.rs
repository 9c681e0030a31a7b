//! Integration tests for the account holder service.

use beacons_core::error::BeaconsError;
use beacons_core::ids::AccountHolderId;
use beacons_core::models::account_holder::{CreateAccountHolder, UpdateAccountHolder};
use beacons_core::models::address::Address;
use beacons_core::models::beacon::BeaconDetails;
use beacons_core::models::registration::{BeaconOwner, CreateRegistration};
use beacons_core::repository::RegistrationRepository;
use beacons_db::repository::{
    SurrealAccountHolderRepository, SurrealBeaconRepository, SurrealRegistrationRepository,
};
use beacons_service::AccountHolderService;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};

type Service = AccountHolderService<SurrealAccountHolderRepository<Db>, SurrealBeaconRepository<Db>>;

async fn setup() -> (Service, Surreal<Db>) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    beacons_db::run_migrations(&db).await.unwrap();

    let service = AccountHolderService::new(
        SurrealAccountHolderRepository::new(db.clone()),
        SurrealBeaconRepository::new(db.clone()),
    );
    (service, db)
}

fn new_holder(auth_id: &str) -> CreateAccountHolder {
    CreateAccountHolder {
        auth_id: auth_id.into(),
        email: "steve@example.com".into(),
        full_name: "Steve Stevington".into(),
        telephone_number: Some("01178 657123".into()),
        alternative_telephone_number: None,
        address: Address {
            address_line1: Some("1 Beacon Square".into()),
            town_or_city: Some("Bristol".into()),
            postcode: Some("BS8 7NW".into()),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn create_and_fetch_by_id_and_auth_id() {
    let (service, _) = setup().await;

    let created = service.create(new_holder("auth-1")).await.unwrap();
    assert_eq!(created.auth_id, "auth-1");

    let by_id = service.get_account_holder(created.id).await.unwrap();
    assert_eq!(by_id.email, "steve@example.com");
    assert_eq!(by_id.address.town_or_city.as_deref(), Some("Bristol"));

    let by_auth = service.get_account_holder_by_auth_id("auth-1").await.unwrap();
    assert_eq!(by_auth.id, created.id);
}

#[tokio::test]
async fn duplicate_auth_id_is_rejected() {
    let (service, _) = setup().await;
    service.create(new_holder("auth-1")).await.unwrap();

    let result = service.create(new_holder("auth-1")).await;
    assert!(matches!(result, Err(BeaconsError::AlreadyExists { .. })));
}

#[tokio::test]
async fn blank_fields_are_rejected() {
    let (service, _) = setup().await;
    let mut input = new_holder("auth-1");
    input.email = "  ".into();

    let result = service.create(input).await;
    assert!(matches!(result, Err(BeaconsError::Validation { .. })));
}

#[tokio::test]
async fn unknown_account_holder_is_not_found() {
    let (service, _) = setup().await;

    let result = service.get_account_holder(AccountHolderId::generate()).await;
    assert!(matches!(result, Err(BeaconsError::NotFound { .. })));

    let result = service.get_account_holder_by_auth_id("nobody").await;
    assert!(matches!(result, Err(BeaconsError::NotFound { .. })));
}

#[tokio::test]
async fn update_changes_only_supplied_fields() {
    let (service, _) = setup().await;
    let created = service.create(new_holder("auth-1")).await.unwrap();

    let updated = service
        .update_account_holder(
            created.id,
            UpdateAccountHolder {
                full_name: Some("Steven Stevington".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.full_name, "Steven Stevington");
    assert_eq!(updated.email, "steve@example.com");
    assert_eq!(updated.telephone_number.as_deref(), Some("01178 657123"));
}

#[tokio::test]
async fn update_unknown_account_holder_is_not_found() {
    let (service, _) = setup().await;
    let result = service
        .update_account_holder(
            AccountHolderId::generate(),
            UpdateAccountHolder {
                email: Some("new@example.com".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(BeaconsError::NotFound { .. })));
}

#[tokio::test]
async fn beacons_exclude_deleted_registrations() {
    let (service, db) = setup().await;
    let holder = service.create(new_holder("auth-1")).await.unwrap();
    let registrations = SurrealRegistrationRepository::new(db);

    let register = |hex_id: &str| CreateRegistration {
        account_holder_id: holder.id,
        hex_id: hex_id.into(),
        details: BeaconDetails::default(),
        owner: BeaconOwner {
            full_name: "Steve Stevington".into(),
            ..Default::default()
        },
        uses: vec![],
        emergency_contacts: vec![],
    };

    let kept = registrations.create(register("AAA")).await.unwrap();
    let removed = registrations.create(register("BBB")).await.unwrap();
    registrations
        .soft_delete(removed.id(), "Lost at sea".into())
        .await
        .unwrap();

    let beacons = service
        .get_beacons_by_account_holder_id(holder.id)
        .await
        .unwrap();
    assert_eq!(beacons.len(), 1);
    assert_eq!(beacons[0].id, kept.id());

    let none = service
        .get_beacons_by_account_holder_id(AccountHolderId::generate())
        .await
        .unwrap();
    assert!(none.is_empty());
}

//! Tests de integración del núcleo transaccional.
//!
//! Requieren una base de datos PostgreSQL accesible vía DATABASE_URL, por lo
//! que están marcados con #[ignore]:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -- --ignored
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use criadero_backend::models::client::{Client, CreateClientRequest};
use criadero_backend::models::contract::{
    ContractStatus, CreateContractRequest, UpdateContractRequest,
};
use criadero_backend::models::payment::{CreatePaymentRequest, PaymentMethod};
use criadero_backend::models::service::CreateServiceRequest;
use criadero_backend::models::specimen::{
    CreateSpecimenRequest, RelocateSpecimenRequest, Specimen, UpdateSpecimenRequest,
};
use criadero_backend::models::specimen_category::CreateCategoryRequest;
use criadero_backend::services::client_service::ClientService;
use criadero_backend::services::contract_service::ContractService;
use criadero_backend::services::payment_service::PaymentService;
use criadero_backend::services::service_service::ServiceService;
use criadero_backend::services::specimen_category_service::SpecimenCategoryService;
use criadero_backend::services::specimen_service::SpecimenService;
use criadero_backend::utils::errors::AppError;

async fn setup_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for these tests");
    let pool = PgPool::connect(&url).await.expect("failed to connect");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("failed to run migrations");
    pool
}

fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

async fn create_client(pool: &PgPool) -> Client {
    let service = ClientService::new(pool.clone());
    service
        .create(CreateClientRequest {
            name: "Cliente de prueba".to_string(),
            document: unique("doc"),
            email: format!("{}@test.com", Uuid::new_v4()),
            phone: "3001234567".to_string(),
        })
        .await
        .expect("failed to create client")
}

async fn create_specimen(pool: &PgPool, owner_id: Uuid) -> Specimen {
    let categories = SpecimenCategoryService::new(pool.clone());
    let category = categories
        .create(CreateCategoryRequest {
            name: unique("categoria"),
        })
        .await
        .expect("failed to create category");

    let specimens = SpecimenService::new(pool.clone());
    specimens
        .create(CreateSpecimenRequest {
            name: "Relámpago".to_string(),
            breed: Some("Criollo".to_string()),
            color: Some("Castaño".to_string()),
            birth_date: NaiveDate::from_ymd_opt(2020, 3, 15),
            owner_id,
            category_id: category.id,
            sede_id: None,
        })
        .await
        .expect("failed to create specimen")
}

async fn create_billable_service(pool: &PgPool) -> Uuid {
    let services = ServiceService::new(pool.clone());
    services
        .create(CreateServiceRequest {
            name: unique("servicio"),
            description: None,
            price: Decimal::new(50_000, 0),
            image_url: None,
        })
        .await
        .expect("failed to create service")
        .id
}

fn contract_request(
    client_id: Uuid,
    specimen_id: Option<Uuid>,
    service_ids: Vec<Uuid>,
) -> CreateContractRequest {
    CreateContractRequest {
        client_id,
        start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        monthly_price: Decimal::new(500_000, 0),
        terms: None,
        specimen_id,
        service_ids,
    }
}

async fn fetch_client(pool: &PgPool, id: Uuid) -> Client {
    ClientService::new(pool.clone())
        .get_by_id(id)
        .await
        .expect("client not found")
}

async fn fetch_specimen(pool: &PgPool, id: Uuid) -> Specimen {
    SpecimenService::new(pool.clone())
        .get_by_id(id)
        .await
        .expect("specimen not found")
}

#[tokio::test]
#[ignore]
async fn counter_tracks_specimen_creation() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    assert_eq!(client.specimen_count, 0);

    let specimen = create_specimen(&pool, client.id).await;
    assert_eq!(specimen.owner_id, client.id);

    let client = fetch_client(&pool, client.id).await;
    assert_eq!(client.specimen_count, 1);
}

#[tokio::test]
#[ignore]
async fn contract_create_binds_specimen_and_services() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let specimen = create_specimen(&pool, client.id).await;
    let svc_a = create_billable_service(&pool).await;
    let svc_b = create_billable_service(&pool).await;

    let contracts = ContractService::new(pool.clone());
    let detail = contracts
        .create(contract_request(
            client.id,
            Some(specimen.id),
            vec![svc_a, svc_b],
        ))
        .await
        .expect("contract creation failed");

    let specimen = fetch_specimen(&pool, specimen.id).await;
    assert_eq!(specimen.contract_id, Some(detail.contract.id));

    let mut service_ids: Vec<Uuid> = detail.services.iter().map(|s| s.id).collect();
    service_ids.sort();
    let mut expected = vec![svc_a, svc_b];
    expected.sort();
    assert_eq!(service_ids, expected);

    assert_eq!(detail.client.id, client.id);
    assert_eq!(detail.specimens.len(), 1);
}

#[tokio::test]
#[ignore]
async fn bound_specimen_rejects_second_contract() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let specimen = create_specimen(&pool, client.id).await;

    let contracts = ContractService::new(pool.clone());
    let first = contracts
        .create(contract_request(client.id, Some(specimen.id), vec![]))
        .await
        .expect("first contract failed");

    let result = contracts
        .create(contract_request(client.id, Some(specimen.id), vec![]))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));

    // El vínculo original queda intacto
    let specimen = fetch_specimen(&pool, specimen.id).await;
    assert_eq!(specimen.contract_id, Some(first.contract.id));
}

#[tokio::test]
#[ignore]
async fn contract_delete_releases_specimen_and_services() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let specimen = create_specimen(&pool, client.id).await;
    let svc = create_billable_service(&pool).await;

    let contracts = ContractService::new(pool.clone());
    let detail = contracts
        .create(contract_request(client.id, Some(specimen.id), vec![svc]))
        .await
        .expect("contract creation failed");

    contracts
        .delete(detail.contract.id)
        .await
        .expect("contract deletion failed");

    let specimen = fetch_specimen(&pool, specimen.id).await;
    assert_eq!(specimen.contract_id, None);

    let result = contracts.get_detail(detail.contract.id).await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
#[ignore]
async fn owner_change_moves_counter_in_one_transaction() {
    let pool = setup_pool().await;

    let original_owner = create_client(&pool).await;
    let new_owner = create_client(&pool).await;
    let specimen = create_specimen(&pool, original_owner.id).await;

    let specimens = SpecimenService::new(pool.clone());
    specimens
        .update(
            specimen.id,
            UpdateSpecimenRequest {
                name: None,
                breed: None,
                color: None,
                birth_date: None,
                owner_id: Some(new_owner.id),
            },
        )
        .await
        .expect("owner change failed");

    let original_owner = fetch_client(&pool, original_owner.id).await;
    let new_owner = fetch_client(&pool, new_owner.id).await;
    assert_eq!(original_owner.specimen_count, 0);
    assert_eq!(new_owner.specimen_count, 1);
}

#[tokio::test]
#[ignore]
async fn payment_rejected_for_finished_contract() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let contracts = ContractService::new(pool.clone());
    let detail = contracts
        .create(contract_request(client.id, None, vec![]))
        .await
        .expect("contract creation failed");

    contracts
        .update(
            detail.contract.id,
            UpdateContractRequest {
                client_id: None,
                start_date: None,
                monthly_price: None,
                status: Some(ContractStatus::Finished),
                terms: None,
                service_ids: None,
            },
        )
        .await
        .expect("status change failed");

    let payments = PaymentService::new(pool.clone());
    let result = payments
        .create(CreatePaymentRequest {
            contract_id: detail.contract.id,
            amount: Decimal::new(500_000, 0),
            method: PaymentMethod::Cash,
            payment_month: 1,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn duplicate_payment_month_conflicts() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let contracts = ContractService::new(pool.clone());
    let detail = contracts
        .create(contract_request(client.id, None, vec![]))
        .await
        .expect("contract creation failed");

    let payments = PaymentService::new(pool.clone());
    let request = CreatePaymentRequest {
        contract_id: detail.contract.id,
        amount: Decimal::new(500_000, 0),
        method: PaymentMethod::Transfer,
        payment_month: 3,
    };

    payments.create(request).await.expect("first payment failed");

    let result = payments
        .create(CreatePaymentRequest {
            contract_id: detail.contract.id,
            amount: Decimal::new(500_000, 0),
            method: PaymentMethod::Cash,
            payment_month: 3,
        })
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn concurrent_contract_creates_one_wins() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let specimen = create_specimen(&pool, client.id).await;

    let contracts = ContractService::new(pool.clone());
    let (a, b) = tokio::join!(
        contracts.create(contract_request(client.id, Some(specimen.id), vec![])),
        contracts.create(contract_request(client.id, Some(specimen.id), vec![])),
    );

    let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
    assert_eq!(successes, 1, "exactamente un contrato debe crearse");

    let conflict = if a.is_err() { a.err() } else { b.err() };
    assert!(matches!(conflict, Some(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn failed_service_validation_rolls_back_update() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let svc = create_billable_service(&pool).await;

    let contracts = ContractService::new(pool.clone());
    let detail = contracts
        .create(contract_request(client.id, None, vec![svc]))
        .await
        .expect("contract creation failed");

    let original_price = detail.contract.monthly_price;

    // El precio cambia y el set de servicios referencia un id inexistente:
    // nada debe persistir.
    let result = contracts
        .update(
            detail.contract.id,
            UpdateContractRequest {
                client_id: None,
                start_date: None,
                monthly_price: Some(Decimal::new(999_999, 0)),
                status: None,
                terms: None,
                service_ids: Some(vec![svc, Uuid::new_v4()]),
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));

    let after = contracts
        .get_detail(detail.contract.id)
        .await
        .expect("contract disappeared");
    assert_eq!(after.contract.monthly_price, original_price);
    assert_eq!(after.services.len(), 1);
    assert_eq!(after.services[0].id, svc);
}

#[tokio::test]
#[ignore]
async fn immutable_client_rejected_on_contract_update() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let other_client = create_client(&pool).await;

    let contracts = ContractService::new(pool.clone());
    let detail = contracts
        .create(contract_request(client.id, None, vec![]))
        .await
        .expect("contract creation failed");

    let result = contracts
        .update(
            detail.contract.id,
            UpdateContractRequest {
                client_id: Some(other_client.id),
                start_date: None,
                monthly_price: None,
                status: None,
                terms: None,
                service_ids: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
#[ignore]
async fn empty_service_list_removes_all_associations() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let svc = create_billable_service(&pool).await;

    let contracts = ContractService::new(pool.clone());
    let detail = contracts
        .create(contract_request(client.id, None, vec![svc]))
        .await
        .expect("contract creation failed");
    assert_eq!(detail.services.len(), 1);

    // Lista presente pero vacía = quitar todos los servicios
    let detail = contracts
        .update(
            detail.contract.id,
            UpdateContractRequest {
                client_id: None,
                start_date: None,
                monthly_price: None,
                status: None,
                terms: None,
                service_ids: Some(vec![]),
            },
        )
        .await
        .expect("update failed");

    assert!(detail.services.is_empty());
}

#[tokio::test]
#[ignore]
async fn relocation_to_same_category_conflicts() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let specimen = create_specimen(&pool, client.id).await;

    let specimens = SpecimenService::new(pool.clone());
    let result = specimens
        .relocate(
            specimen.id,
            RelocateSpecimenRequest {
                category_id: Some(specimen.category_id),
                sede_id: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn relocation_without_targets_is_bad_request() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let specimen = create_specimen(&pool, client.id).await;

    let specimens = SpecimenService::new(pool.clone());
    let result = specimens
        .relocate(
            specimen.id,
            RelocateSpecimenRequest {
                category_id: None,
                sede_id: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[tokio::test]
#[ignore]
async fn specimen_delete_decrements_counter() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let specimen = create_specimen(&pool, client.id).await;

    let specimens = SpecimenService::new(pool.clone());
    specimens.delete(specimen.id).await.expect("delete failed");

    let client = fetch_client(&pool, client.id).await;
    assert_eq!(client.specimen_count, 0);
}

#[tokio::test]
#[ignore]
async fn finished_contract_is_terminal() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    let contracts = ContractService::new(pool.clone());
    let detail = contracts
        .create(contract_request(client.id, None, vec![]))
        .await
        .expect("contract creation failed");

    let finish = UpdateContractRequest {
        client_id: None,
        start_date: None,
        monthly_price: None,
        status: Some(ContractStatus::Finished),
        terms: None,
        service_ids: None,
    };
    contracts
        .update(detail.contract.id, finish)
        .await
        .expect("finishing failed");

    let result = contracts
        .update(
            detail.contract.id,
            UpdateContractRequest {
                client_id: None,
                start_date: None,
                monthly_price: None,
                status: Some(ContractStatus::Active),
                terms: None,
                service_ids: None,
            },
        )
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

#[tokio::test]
#[ignore]
async fn purge_rejected_while_client_owns_specimens() {
    let pool = setup_pool().await;

    let client = create_client(&pool).await;
    create_specimen(&pool, client.id).await;

    let clients = ClientService::new(pool.clone());
    let result = clients.purge(client.id).await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

//! Seeded demo records and an in-memory backend so the institutions screen
//! can run without the gateway.

use crate::api::{
    encode_active_modules, ActiveModules, ApiError, ApiResult, CreateOrganizationRequest,
    DeleteOrganizationResponse, ErrorEnvelope, Organization, UpdateOrganizationRequest,
};
use chrono::{TimeZone, Utc};
use std::cell::RefCell;
use std::rc::Rc;

fn seed(
    id: &str,
    name: &str,
    manager: &str,
    address: &str,
    is_active: bool,
    modules: ActiveModules,
    day: u32,
) -> Organization {
    let created_at = Utc
        .with_ymd_and_hms(2025, 1, day, 9, 0, 0)
        .single()
        .unwrap_or_default();
    Organization {
        organization_id: id.to_string(),
        name: name.to_string(),
        description: format!("Менеджер: {}", manager),
        address: address.to_string(),
        is_active,
        created_at,
        updated_at: created_at,
        map_url: String::new(),
        active_modules: encode_active_modules(&modules),
    }
}

pub fn seed_institutions() -> Vec<Organization> {
    vec![
        seed(
            "1",
            "Главный офис",
            "Иванов И.И.",
            "ул. Абая, 150, Алматы",
            true,
            ActiveModules {
                smoke_detection: true,
                fire_detection: true,
                access_control: true,
                perimeter_monitoring: true,
            },
            6,
        ),
        seed(
            "2",
            "Склад A",
            "Петрова А.С.",
            "ул. Сатпаева, 25, Алматы",
            true,
            ActiveModules {
                smoke_detection: true,
                fire_detection: true,
                access_control: false,
                perimeter_monitoring: true,
            },
            7,
        ),
        seed(
            "3",
            "Склад Б",
            "Смирнов А.В.",
            "пр. Аль-Фараби, 77, Алматы",
            true,
            ActiveModules {
                smoke_detection: true,
                fire_detection: false,
                access_control: true,
                perimeter_monitoring: false,
            },
            8,
        ),
        seed(
            "4",
            "Аналитический центр",
            "Кузнецова М.А.",
            "ул. Розыбакиева, 289, Алматы",
            true,
            ActiveModules {
                smoke_detection: true,
                fire_detection: true,
                access_control: true,
                perimeter_monitoring: false,
            },
            9,
        ),
        seed(
            "5",
            "Офис №2",
            "Сидоров К.П.",
            "ул. Байзакова, 180, Алматы",
            false,
            ActiveModules {
                smoke_detection: false,
                fire_detection: true,
                access_control: true,
                perimeter_monitoring: true,
            },
            10,
        ),
    ]
}

/// Mutable in-memory stand-in for the organizations endpoints. Mirrors the
/// server contract closely enough that the view model cannot tell them apart:
/// ids are assigned here, unknown ids fail the same way a 404 would.
#[derive(Clone)]
pub struct FixtureStore {
    records: Rc<RefCell<Vec<Organization>>>,
}

impl FixtureStore {
    pub fn new() -> Self {
        Self {
            records: Rc::new(RefCell::new(seed_institutions())),
        }
    }

    pub fn list(&self) -> Vec<Organization> {
        self.records.borrow().clone()
    }

    pub fn create(&self, request: &CreateOrganizationRequest) -> Organization {
        let now = Utc::now();
        let organization = Organization {
            organization_id: uuid::Uuid::new_v4().to_string(),
            name: request.name.clone(),
            description: request.description.clone(),
            address: request.address.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
            map_url: request.map_url.clone(),
            active_modules: request.active_modules.clone(),
        };
        self.records.borrow_mut().push(organization.clone());
        organization
    }

    pub fn update(&self, request: &UpdateOrganizationRequest) -> ApiResult<Organization> {
        let mut records = self.records.borrow_mut();
        let record = records
            .iter_mut()
            .find(|record| record.organization_id == request.organization_id)
            .ok_or_else(not_found)?;
        record.name = request.name.clone();
        record.description = request.description.clone();
        record.address = request.address.clone();
        record.is_active = request.is_active;
        record.map_url = request.map_url.clone();
        record.active_modules = request.active_modules.clone();
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    pub fn delete(&self, organization_id: &str) -> ApiResult<DeleteOrganizationResponse> {
        let mut records = self.records.borrow_mut();
        let before = records.len();
        records.retain(|record| record.organization_id != organization_id);
        if records.len() == before {
            return Err(not_found());
        }
        Ok(DeleteOrganizationResponse {
            success: true,
            message: "Учреждение удалено".to_string(),
        })
    }
}

impl Default for FixtureStore {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found() -> ApiError {
    ApiError::application(
        404,
        ErrorEnvelope {
            error: "Not found".to_string(),
            message: "Учреждение не найдено".to_string(),
        },
    )
}

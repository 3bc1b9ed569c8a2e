use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::errors::AppError;
use crate::models::employee::{Employee, EmployeeChanges};
use crate::store::EmployeeStore;
use crate::utils::upload::{self, UploadConfig};

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/employees")
            .route(web::get().to(list_employees))
            .route(web::post().to(create_employee)),
    )
    .service(
        web::resource("/employees/{id}")
            .route(web::get().to(get_employee))
            .route(web::put().to(update_employee))
            .route(web::delete().to(delete_employee)),
    );
}

pub async fn list_employees(
    store: web::Data<EmployeeStore>,
) -> Result<HttpResponse, actix_web::Error> {
    let emp_list = store.list_active().await;
    Ok(HttpResponse::Ok().json(json!({ "empList": emp_list })))
}

// Details are returned whether or not the record is soft-deleted; only the
// listing filters on the flag.
pub async fn get_employee(
    store: web::Data<EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let emp_id = path.into_inner();
    let emp_details = store.find_by_id(&emp_id).await.ok_or(AppError::NotFound)?;
    Ok(HttpResponse::Ok().json(json!({ "empDetails": emp_details })))
}

pub async fn create_employee(
    store: web::Data<EmployeeStore>,
    config: web::Data<UploadConfig>,
    payload: Multipart,
) -> Result<HttpResponse, actix_web::Error> {
    let form = upload::collect_employee_form(payload, &config.dir).await?;

    let fname = require(form.fname, "First name can't be blank!")?;
    let lname = require(form.lname, "Last name can't be blank!")?;
    let dob = require(form.dob, "Date of Birth can't be blank!")?;
    let country = require(form.country, "Country can't be blank!")?;
    let avatar = form
        .avatar
        .ok_or_else(|| AppError::Validation("Please select a profile picture!".to_string()))?;
    // email has no blank-field check of its own; a missing value surfaces
    // as a 500 rather than a field message
    let email = form
        .email
        .ok_or_else(|| AppError::Internal("email field missing".to_string()))?
        .to_lowercase();

    let employee = Employee::new(fname, lname, email, dob, country, upload::public_path(&avatar));
    store.insert(employee).await.map_err(AppError::from)?;
    Ok(HttpResponse::Created().json(json!({ "msg": "Employee added successfully!" })))
}

pub async fn update_employee(
    store: web::Data<EmployeeStore>,
    config: web::Data<UploadConfig>,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, actix_web::Error> {
    let emp_id = path.into_inner();
    let form = upload::collect_employee_form(payload, &config.dir).await?;

    let fname = require(form.fname, "First name can't be blank!")?;
    let lname = require(form.lname, "Last name can't be blank!")?;
    let dob = require(form.dob, "Date of Birth can't be blank!")?;
    let country = require(form.country, "Country can't be blank!")?;
    let email = form
        .email
        .ok_or_else(|| AppError::Internal("email field missing".to_string()))?
        .to_lowercase();

    let changes = EmployeeChanges {
        fname,
        lname,
        email,
        dob,
        country,
        avatar: form.avatar.map(|name| upload::public_path(&name)),
    };
    store.update(&emp_id, changes).await.map_err(AppError::from)?;
    Ok(HttpResponse::Ok().json(json!({ "msg": "Employee details updated successfully!" })))
}

pub async fn delete_employee(
    store: web::Data<EmployeeStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, actix_web::Error> {
    let emp_id = path.into_inner();
    store.soft_delete(&emp_id).await.map_err(AppError::from)?;
    Ok(HttpResponse::Ok().json(json!({ "msg": "Employee removed successfully!" })))
}

fn require(value: Option<String>, msg: &str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(msg.to_string()))
}

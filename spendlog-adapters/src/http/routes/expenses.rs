use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use spendlog_application::{
    AddExpenseUseCase, DeleteExpenseUseCase, ListExpensesUseCase, UpdateExpenseUseCase,
};
use spendlog_core::{
    Amount, Category, Expense, ExpenseDraft, ExpenseId, ExpenseStore, ValidationError,
};

use crate::auth::{SessionConfig, authorize};

use super::error::ApiError;

#[derive(Deserialize)]
pub struct ExpenseRequest {
    pub title: Option<String>,
    pub amount: Option<Decimal>,
    pub category: Option<Category>,
    pub date: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct ExpenseResponse {
    pub id: ExpenseId,
    pub title: String,
    pub amount: Decimal,
    pub category: Category,
    pub date: NaiveDate,
}

impl From<&Expense> for ExpenseResponse {
    fn from(expense: &Expense) -> Self {
        Self {
            id: expense.id(),
            title: expense.title().to_owned(),
            amount: expense.amount().value(),
            category: expense.category(),
            date: expense.date(),
        }
    }
}

fn parse_draft(request: ExpenseRequest) -> Result<ExpenseDraft, ApiError> {
    let title = request
        .title
        .ok_or(ValidationError::MissingField("title"))?;
    let amount = Amount::new(
        request
            .amount
            .ok_or(ValidationError::MissingField("amount"))?,
    )?;
    let category = request
        .category
        .ok_or(ValidationError::MissingField("category"))?;
    let date = request.date.ok_or(ValidationError::MissingField("date"))?;

    Ok(ExpenseDraft::new(&title, amount, category, date)?)
}

#[tracing::instrument(name = "Add expense", skip_all)]
pub async fn add_expense<S>(
    State((expense_store, session)): State<(S, SessionConfig)>,
    jar: CookieJar,
    Json(request): Json<ExpenseRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: ExpenseStore + Clone + 'static,
{
    let owner = authorize(&jar, &session)?;
    let draft = parse_draft(request)?;

    let use_case = AddExpenseUseCase::new(expense_store);
    let expense = use_case.execute(owner, draft).await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(&expense))))
}

#[tracing::instrument(name = "List expenses", skip_all)]
pub async fn list_expenses<S>(
    State((expense_store, session)): State<(S, SessionConfig)>,
    jar: CookieJar,
) -> Result<impl IntoResponse, ApiError>
where
    S: ExpenseStore + Clone + 'static,
{
    let owner = authorize(&jar, &session)?;

    let use_case = ListExpensesUseCase::new(expense_store);
    let expenses = use_case.execute(owner).await?;

    let body: Vec<ExpenseResponse> = expenses.iter().map(ExpenseResponse::from).collect();
    Ok((StatusCode::OK, Json(body)))
}

#[tracing::instrument(name = "Update expense", skip_all)]
pub async fn update_expense<S>(
    State((expense_store, session)): State<(S, SessionConfig)>,
    jar: CookieJar,
    Path(id): Path<ExpenseId>,
    Json(request): Json<ExpenseRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: ExpenseStore + Clone + 'static,
{
    let owner = authorize(&jar, &session)?;
    let draft = parse_draft(request)?;

    let use_case = UpdateExpenseUseCase::new(expense_store);
    let expense = use_case.execute(owner, id, draft).await?;

    Ok((StatusCode::OK, Json(ExpenseResponse::from(&expense))))
}

#[tracing::instrument(name = "Delete expense", skip_all)]
pub async fn delete_expense<S>(
    State((expense_store, session)): State<(S, SessionConfig)>,
    jar: CookieJar,
    Path(id): Path<ExpenseId>,
) -> Result<impl IntoResponse, ApiError>
where
    S: ExpenseStore + Clone + 'static,
{
    let owner = authorize(&jar, &session)?;

    let use_case = DeleteExpenseUseCase::new(expense_store);
    use_case.execute(owner, id).await?;

    Ok(StatusCode::OK)
}

//! Region endpoint: `POST /regionService/{operation}`.
//!
//! Every handler returns a [`ServiceResult`]; failures from body decoding, the
//! mapper, or the service are logged and wrapped, never returned as an HTTP
//! error.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use refhub_app::ports::RegionRepository;
use refhub_domain::error::{RefHubError, ValidationError};
use refhub_domain::language::Iso3Language;

use crate::dto::{
    CountAnyMatchingQuery, DeleteByIdQuery, FindAnyMatchingQuery, GetByIdQuery, PageDto,
    QueryContext, RegionDto, SaveQuery,
};
use crate::envelope::ServiceResult;
use crate::error::malformed;
use crate::mapper;
use crate::state::AppState;

const FIND_ANY_MATCHING: &str = "regionService.findAnyMatching";
const COUNT_ANY_MATCHING: &str = "regionService.countAnyMatching";
const GET_BY_ID: &str = "regionService.getById";
const SAVE: &str = "regionService.save";
const DELETE: &str = "regionService.delete";

type JsonBody<T> = Result<Json<T>, JsonRejection>;

/// Language for `displayName`: the caller's language, else `fallback`.
fn display_language(
    context: &QueryContext,
    fallback: Option<&Iso3Language>,
) -> Result<Option<Iso3Language>, RefHubError> {
    let requested = mapper::to_language(context.query_iso3_language.as_deref())?;
    Ok(requested.or_else(|| fallback.cloned()))
}

/// `POST /regionService/findAnyMatching`
pub async fn find_any_matching<R>(
    State(state): State<AppState<R>>,
    body: JsonBody<FindAnyMatchingQuery>,
) -> ServiceResult<PageDto<RegionDto>>
where
    R: RegionRepository + Send + Sync + 'static,
{
    ServiceResult::from_result(FIND_ANY_MATCHING, find(&state, body).await)
}

async fn find<R>(
    state: &AppState<R>,
    body: JsonBody<FindAnyMatchingQuery>,
) -> Result<PageDto<RegionDto>, RefHubError>
where
    R: RegionRepository + Send + Sync + 'static,
{
    let Json(query) = body.map_err(malformed)?;
    let language = mapper::to_language(query.iso3_language.as_deref())?;
    let display = display_language(&query.context, language.as_ref())?;
    let pageable = mapper::to_pageable(query.pageable)?;

    let page = state
        .region_service
        .find_any_matching(query.filter.as_deref(), language, pageable)
        .await?;
    Ok(mapper::to_page_dto(page, display.as_ref()))
}

/// `POST /regionService/countAnyMatching`
pub async fn count_any_matching<R>(
    State(state): State<AppState<R>>,
    body: JsonBody<CountAnyMatchingQuery>,
) -> ServiceResult<u64>
where
    R: RegionRepository + Send + Sync + 'static,
{
    ServiceResult::from_result(COUNT_ANY_MATCHING, count(&state, body).await)
}

async fn count<R>(
    state: &AppState<R>,
    body: JsonBody<CountAnyMatchingQuery>,
) -> Result<u64, RefHubError>
where
    R: RegionRepository + Send + Sync + 'static,
{
    let Json(query) = body.map_err(malformed)?;
    let language = mapper::to_language(query.iso3_language.as_deref())?;
    state
        .region_service
        .count_any_matching(query.filter.as_deref(), language)
        .await
}

/// `POST /regionService/getById`
pub async fn get_by_id<R>(
    State(state): State<AppState<R>>,
    body: JsonBody<GetByIdQuery>,
) -> ServiceResult<RegionDto>
where
    R: RegionRepository + Send + Sync + 'static,
{
    ServiceResult::from_result(GET_BY_ID, get(&state, body).await)
}

async fn get<R>(
    state: &AppState<R>,
    body: JsonBody<GetByIdQuery>,
) -> Result<RegionDto, RefHubError>
where
    R: RegionRepository + Send + Sync + 'static,
{
    let Json(query) = body.map_err(malformed)?;
    let id = mapper::to_region_id(query.id.as_deref())?;
    let display = display_language(&query.context, None)?;

    let region = state.region_service.load(id).await?;
    Ok(mapper::to_region_dto(region, display.as_ref()))
}

/// `POST /regionService/save`
pub async fn save<R>(
    State(state): State<AppState<R>>,
    body: JsonBody<SaveQuery<RegionDto>>,
) -> ServiceResult<RegionDto>
where
    R: RegionRepository + Send + Sync + 'static,
{
    ServiceResult::from_result(SAVE, persist(&state, body).await)
}

async fn persist<R>(
    state: &AppState<R>,
    body: JsonBody<SaveQuery<RegionDto>>,
) -> Result<RegionDto, RefHubError>
where
    R: RegionRepository + Send + Sync + 'static,
{
    let Json(query) = body.map_err(malformed)?;
    let display = display_language(&query.context, None)?;
    let entity = query.entity.ok_or(ValidationError::MissingEntity)?;
    let region = mapper::to_region(entity)?;

    let saved = state.region_service.save(region).await?;
    Ok(mapper::to_region_dto(saved, display.as_ref()))
}

/// `POST /regionService/delete`
pub async fn delete<R>(
    State(state): State<AppState<R>>,
    body: JsonBody<DeleteByIdQuery>,
) -> ServiceResult<()>
where
    R: RegionRepository + Send + Sync + 'static,
{
    ServiceResult::from_unit(DELETE, remove(&state, body).await)
}

async fn remove<R>(
    state: &AppState<R>,
    body: JsonBody<DeleteByIdQuery>,
) -> Result<(), RefHubError>
where
    R: RegionRepository + Send + Sync + 'static,
{
    let Json(query) = body.map_err(malformed)?;
    let id = mapper::to_region_id(query.id.as_deref())?;
    state.region_service.delete(id).await
}

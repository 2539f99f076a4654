use crate::{
    authz,
    errors::{Error, Result},
    manipulations,
    middlewares::CurrentUser,
    models::{
        ManipulationKind,
        params::{Pagination, ResizeInput},
        payload::{ManipulationPayload, Page},
    },
    store::{
        self,
        manipulations::{ManipulationRecord, NewManipulation, PER_PAGE},
    },
    vars::RESIZD_PUBLIC_BASE,
};
use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query},
    http::StatusCode,
};
use log::info;
use std::path::PathBuf;
use tokio::task::spawn_blocking;

pub async fn index(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Page<ManipulationPayload>>> {
    let page = pagination.page();
    let (records, total) =
        store::manipulations::list_by_user(store::pool(), user.id, page).await?;

    Ok(Json(to_page(records, page, total)))
}

pub async fn by_album(
    Path(album_id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Query(pagination): Query<Pagination>,
) -> Result<Json<Page<ManipulationPayload>>> {
    let album = store::albums::find(store::pool(), album_id)
        .await?
        .ok_or(Error::AlbumNotFound(album_id))?;
    authz::ensure_album_owner(&album, user.id)?;

    let page = pagination.page();
    let (records, total) =
        store::manipulations::list_by_album(store::pool(), album.id, page).await?;

    Ok(Json(to_page(records, page, total)))
}

pub async fn resize(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<ManipulationPayload>)> {
    let input = ResizeInput::from_multipart(multipart).await?;

    // Album ownership is settled before anything touches the disk
    if let Some(album_id) = input.album_id {
        let album = store::albums::find(store::pool(), album_id)
            .await?
            .ok_or(Error::AlbumNotFound(album_id))?;
        authz::ensure_album_owner(&album, user.id)?;
    }

    let data = input.data();
    let token = manipulations::idgen();
    let public_base = PathBuf::from(*RESIZD_PUBLIC_BASE);
    let ResizeInput {
        source,
        w,
        h,
        album_id,
    } = input;
    let outcome =
        spawn_blocking(move || manipulations::resize(&public_base, &token, source, &w, h.as_deref()))
            .await??;

    info!(
        "Resized {} to {}x{} for user {}",
        outcome.name, outcome.width, outcome.height, user.id
    );

    let record = store::manipulations::create(
        store::pool(),
        NewManipulation {
            kind: ManipulationKind::Resize,
            name: outcome.name,
            path: outcome.path,
            output_path: outcome.output_path,
            data,
            album_id,
            user_id: user.id,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}

pub async fn show(
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<ManipulationPayload>> {
    let record = store::manipulations::find(store::pool(), id)
        .await?
        .ok_or(Error::RecordNotFound(id))?;
    authz::ensure_record_owner(&record, user.id)?;

    Ok(Json(record.into()))
}

pub async fn destroy(
    Path(id): Path<i64>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<StatusCode> {
    let record = store::manipulations::find(store::pool(), id)
        .await?
        .ok_or(Error::RecordNotFound(id))?;
    authz::ensure_record_owner(&record, user.id)?;

    store::manipulations::delete(store::pool(), record.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

fn to_page(records: Vec<ManipulationRecord>, page: u32, total: i64) -> Page<ManipulationPayload> {
    Page {
        data: records.into_iter().map(Into::into).collect(),
        page,
        per_page: PER_PAGE,
        total,
    }
}

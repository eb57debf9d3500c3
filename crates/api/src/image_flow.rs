//! Row-plus-image writes shared by clients, members and gallery items.
//!
//! Create: insert the row in a transaction, write the file, store the link,
//! commit. Any failure after the write discards the file and the
//! transaction rolls back.
//!
//! Update: move the old file to its backup name and write the new one,
//! then update the row. Success drops the backup; failure (or a row that
//! vanished meanwhile) deletes the new file and restores the backup.

use ajfses_core::error::CoreError;
use ajfses_core::images::ImageKind;
use ajfses_core::types::DbId;
use ajfses_db::models::client::{Client, CreateClient, UpdateClient};
use ajfses_db::models::gallery::{CreateGalleryItem, GalleryItem, UpdateGalleryItem};
use ajfses_db::models::member::{CreateMember, Member, UpdateMember};
use ajfses_db::repositories::{ClientRepo, GalleryRepo, MemberRepo};
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::upload::ValidatedImage;

/// A table whose rows carry an image link.
pub(crate) trait ImageBacked {
    type Row;
    type Create;
    type Update;

    const KIND: ImageKind;
    const ENTITY: &'static str;

    fn id(row: &Self::Row) -> DbId;
    fn image_link(row: &Self::Row) -> Option<&str>;

    async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &Self::Create,
    ) -> Result<Self::Row, sqlx::Error>;

    async fn set_image_link_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        link: &str,
    ) -> Result<Self::Row, sqlx::Error>;

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &Self::Update,
        link: Option<&str>,
    ) -> Result<Option<Self::Row>, sqlx::Error>;
}

/// Insert a row and, if given, its image as one unit.
pub(crate) async fn create_with_image<R: ImageBacked>(
    state: &AppState,
    input: &R::Create,
    display_name: &str,
    image: Option<&ValidatedImage>,
) -> AppResult<R::Row> {
    let mut tx = state.pool.begin().await?;
    let row = R::create_tx(&mut tx, input).await?;

    let Some(image) = image else {
        tx.commit().await?;
        return Ok(row);
    };

    let id = R::id(&row);
    let filename = image.filename_for(R::KIND, id, display_name);
    let pending = state.images.put(R::KIND, &filename, image.bytes()).await?;

    let linked = async {
        let row = R::set_image_link_tx(&mut tx, id, pending.filename()).await?;
        tx.commit().await?;
        Ok::<_, sqlx::Error>(row)
    }
    .await;

    match linked {
        Ok(row) => {
            pending.keep();
            Ok(row)
        }
        Err(e) => {
            if let Err(io) = pending.discard().await {
                tracing::warn!(
                    entity = R::ENTITY,
                    id,
                    error = %io,
                    "Failed to remove image of rolled-back row"
                );
            }
            Err(e.into())
        }
    }
}

/// Apply a partial update, swapping the image when a new one is given.
pub(crate) async fn update_with_image<R: ImageBacked>(
    state: &AppState,
    existing: &R::Row,
    input: &R::Update,
    display_name: &str,
    image: Option<&ValidatedImage>,
) -> AppResult<R::Row> {
    let id = R::id(existing);
    let not_found = || AppError::Core(CoreError::not_found(R::ENTITY, id));

    let Some(image) = image else {
        return R::update(&state.pool, id, input, None)
            .await?
            .ok_or_else(not_found);
    };

    let filename = image.filename_for(R::KIND, id, display_name);
    let swap = state
        .images
        .replace(R::KIND, R::image_link(existing), &filename, image.bytes())
        .await?;

    match R::update(&state.pool, id, input, Some(swap.filename())).await {
        Ok(Some(row)) => {
            if let Err(io) = swap.commit().await {
                tracing::warn!(entity = R::ENTITY, id, error = %io, "Failed to remove image backup");
            }
            Ok(row)
        }
        outcome => {
            if let Err(io) = swap.rollback().await {
                tracing::error!(
                    entity = R::ENTITY,
                    id,
                    error = %io,
                    "Failed to restore previous image"
                );
            }
            match outcome {
                Err(e) => Err(e.into()),
                _ => Err(not_found()),
            }
        }
    }
}

/// Delete a removed row's image file. Failures are logged, not returned:
/// the row is already gone.
pub(crate) async fn remove_image(state: &AppState, kind: ImageKind, link: Option<&str>) {
    let Some(link) = link else { return };
    if let Err(e) = state.images.remove(kind, link).await {
        tracing::warn!(kind = kind.dir_name(), file = link, error = %e, "Failed to remove image file");
    }
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

impl ImageBacked for ClientRepo {
    type Row = Client;
    type Create = CreateClient;
    type Update = UpdateClient;

    const KIND: ImageKind = ImageKind::Client;
    const ENTITY: &'static str = "Client";

    fn id(row: &Client) -> DbId {
        row.id
    }

    fn image_link(row: &Client) -> Option<&str> {
        row.image_link.as_deref()
    }

    async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        ClientRepo::create_tx(tx, input).await
    }

    async fn set_image_link_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        link: &str,
    ) -> Result<Client, sqlx::Error> {
        ClientRepo::set_image_link_tx(tx, id, link).await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateClient,
        link: Option<&str>,
    ) -> Result<Option<Client>, sqlx::Error> {
        ClientRepo::update(pool, id, input, link).await
    }
}

impl ImageBacked for MemberRepo {
    type Row = Member;
    type Create = CreateMember;
    type Update = UpdateMember;

    const KIND: ImageKind = ImageKind::Member;
    const ENTITY: &'static str = "Member";

    fn id(row: &Member) -> DbId {
        row.id
    }

    fn image_link(row: &Member) -> Option<&str> {
        row.image_link.as_deref()
    }

    async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateMember,
    ) -> Result<Member, sqlx::Error> {
        MemberRepo::create_tx(tx, input).await
    }

    async fn set_image_link_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        link: &str,
    ) -> Result<Member, sqlx::Error> {
        MemberRepo::set_image_link_tx(tx, id, link).await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMember,
        link: Option<&str>,
    ) -> Result<Option<Member>, sqlx::Error> {
        MemberRepo::update(pool, id, input, link).await
    }
}

impl ImageBacked for GalleryRepo {
    type Row = GalleryItem;
    type Create = CreateGalleryItem;
    type Update = UpdateGalleryItem;

    const KIND: ImageKind = ImageKind::Gallery;
    const ENTITY: &'static str = "GalleryItem";

    fn id(row: &GalleryItem) -> DbId {
        row.id
    }

    fn image_link(row: &GalleryItem) -> Option<&str> {
        row.image_link.as_deref()
    }

    async fn create_tx(
        tx: &mut Transaction<'_, Postgres>,
        input: &CreateGalleryItem,
    ) -> Result<GalleryItem, sqlx::Error> {
        GalleryRepo::create_tx(tx, input).await
    }

    async fn set_image_link_tx(
        tx: &mut Transaction<'_, Postgres>,
        id: DbId,
        link: &str,
    ) -> Result<GalleryItem, sqlx::Error> {
        GalleryRepo::set_image_link_tx(tx, id, link).await
    }

    async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateGalleryItem,
        link: Option<&str>,
    ) -> Result<Option<GalleryItem>, sqlx::Error> {
        GalleryRepo::update(pool, id, input, link).await
    }
}

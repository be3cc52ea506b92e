mod common;

use assert_matches::assert_matches;
use common::{person, Harness};
use giapha_core::error::CoreError;
use giapha_core::media::{MediaState, MAX_IMAGE_BYTES};
use giapha_pipeline::media::{self, UploadRequest};
use giapha_pipeline::{avatar, Actor, PipelineError};

const QUOTA: i64 = 2;

fn image(name: &str) -> UploadRequest {
    UploadRequest {
        file_name: name.to_string(),
        mime_type: "image/png".to_string(),
        bytes: vec![0x89, b'P', b'N', b'G'],
        linked_person: None,
        title: Some("Ảnh họ".into()),
        description: None,
    }
}

async fn upload_as(h: &Harness, who: &Actor, req: UploadRequest) -> Result<media::UploadOutcome, PipelineError> {
    media::upload(h.store.as_ref(), h.objects.as_ref(), who, QUOTA, req).await
}

#[tokio::test]
async fn upload_stores_object_and_pending_row() {
    let h = Harness::new();
    let out = upload_as(&h, &h.member, image("anh-1.png")).await.unwrap();

    assert_eq!(out.media.state, "PENDING");
    assert_eq!(out.media.media_type, "IMAGE");
    assert_eq!(out.media.file_size, 4);
    assert_eq!(out.quota.used, 1);
    assert_eq!(out.quota.limit, QUOTA);
    assert!(h.objects.contains(&out.media.storage_path));
    assert!(out.media.storage_url.ends_with(&out.media.storage_path));
}

#[tokio::test]
async fn quota_counts_pending_and_published_only() {
    let h = Harness::new();
    let first = upload_as(&h, &h.member, image("a.png")).await.unwrap();
    upload_as(&h, &h.member, image("b.png")).await.unwrap();

    let err = upload_as(&h, &h.member, image("c.png")).await.unwrap_err();
    assert_matches!(err, PipelineError::Core(CoreError::Conflict(_)));
    assert_eq!(h.objects.object_count(), 2);

    // Rejected items free a slot.
    media::moderate(h.store.as_ref(), &h.editor, first.media.id, MediaState::Rejected)
        .await
        .unwrap();
    let out = upload_as(&h, &h.member, image("d.png")).await.unwrap();
    assert_eq!(out.quota.used, 2);
}

#[tokio::test]
async fn quota_is_per_uploader() {
    let h = Harness::new();
    upload_as(&h, &h.member, image("a.png")).await.unwrap();
    upload_as(&h, &h.member, image("b.png")).await.unwrap();
    let out = upload_as(&h, &h.editor, image("c.png")).await.unwrap();
    assert_eq!(out.quota.used, 1);
}

#[tokio::test]
async fn disallowed_mime_and_oversize_are_rejected_before_storage() {
    let h = Harness::new();
    let mut svg = image("x.svg");
    svg.mime_type = "image/svg+xml".into();
    assert_matches!(
        upload_as(&h, &h.member, svg).await,
        Err(PipelineError::Core(CoreError::Validation(_)))
    );

    let mut big = image("big.png");
    big.bytes = vec![0; MAX_IMAGE_BYTES + 1];
    assert_matches!(
        upload_as(&h, &h.member, big).await,
        Err(PipelineError::Core(CoreError::Validation(_)))
    );

    let mut empty = image("empty.png");
    empty.bytes.clear();
    assert_matches!(
        upload_as(&h, &h.member, empty).await,
        Err(PipelineError::Core(CoreError::Validation(_)))
    );

    assert_eq!(h.objects.object_count(), 0);
    assert!(h.store.media().is_empty());
}

#[tokio::test]
async fn pdf_is_accepted_as_document() {
    let h = Harness::new();
    let mut pdf = image("gia-pha.pdf");
    pdf.mime_type = "Application/PDF".into();
    let out = upload_as(&h, &h.member, pdf).await.unwrap();
    assert_eq!(out.media.media_type, "DOCUMENT");
    assert_eq!(out.media.mime_type, "application/pdf");
}

#[tokio::test]
async fn unknown_linked_person_is_not_found() {
    let h = Harness::new();
    let mut req = image("a.png");
    req.linked_person = Some("khong-co".into());
    assert_matches!(
        upload_as(&h, &h.member, req).await,
        Err(PipelineError::Core(CoreError::NotFound { .. }))
    );
    assert_eq!(h.objects.object_count(), 0);
}

#[tokio::test]
async fn failed_record_removes_stored_object() {
    let h = Harness::new();
    h.store.fail_on("insert_media");

    let err = upload_as(&h, &h.member, image("a.png")).await.unwrap_err();
    assert_matches!(err, PipelineError::Store(_));
    assert_eq!(h.objects.object_count(), 0);
    assert_eq!(h.objects.deleted().len(), 1);
    assert!(h.store.media().is_empty());
}

#[tokio::test]
async fn storage_failure_records_nothing() {
    let h = Harness::new();
    h.objects.fail_puts(true);
    let err = upload_as(&h, &h.member, image("a.png")).await.unwrap_err();
    assert_matches!(err, PipelineError::Storage(_));
    assert!(h.store.media().is_empty());
}

#[tokio::test]
async fn moderation_requires_moderator_and_valid_transition() {
    let h = Harness::new();
    let out = upload_as(&h, &h.member, image("a.png")).await.unwrap();
    let id = out.media.id;

    assert_matches!(
        media::moderate(h.store.as_ref(), &h.member, id, MediaState::Published).await,
        Err(PipelineError::Core(CoreError::Forbidden(_)))
    );

    let published = media::moderate(h.store.as_ref(), &h.editor, id, MediaState::Published)
        .await
        .unwrap();
    assert_eq!(published.state, "PUBLISHED");

    assert_matches!(
        media::moderate(h.store.as_ref(), &h.admin, id, MediaState::Pending).await,
        Err(PipelineError::Core(CoreError::Validation(_)))
    );

    let audit = h.store.audit_logs();
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].action, "media.moderated");
}

#[tokio::test]
async fn owner_or_admin_can_soft_delete() {
    let h = Harness::new();
    let mine = upload_as(&h, &h.member, image("a.png")).await.unwrap().media;
    let other = upload_as(&h, &h.editor, image("b.png")).await.unwrap().media;

    assert_matches!(
        media::delete(h.store.as_ref(), &h.member, other.id).await,
        Err(PipelineError::Core(CoreError::Forbidden(_)))
    );

    media::delete(h.store.as_ref(), &h.member, mine.id).await.unwrap();
    media::delete(h.store.as_ref(), &h.admin, other.id).await.unwrap();

    let states: Vec<_> = h.store.media().into_iter().map(|m| m.state).collect();
    assert_eq!(states, vec!["DELETED", "DELETED"]);
    // Soft delete keeps the object.
    assert_eq!(h.objects.object_count(), 2);

    assert_matches!(
        media::delete(h.store.as_ref(), &h.member, mine.id).await,
        Err(PipelineError::Core(CoreError::NotFound { .. }))
    );
}

#[tokio::test]
async fn avatar_must_be_published_image_of_same_person() {
    let h = Harness::new();
    h.store.add_person(&person("nguyen-van-an", "Nguyễn Văn An"));
    h.store.add_person(&person("le-thi-b", "Lê Thị B"));

    let mut req = image("chan-dung.png");
    req.linked_person = Some("nguyen-van-an".into());
    let photo = upload_as(&h, &h.member, req).await.unwrap().media;

    assert_matches!(
        avatar::set_avatar(h.store.as_ref(), &h.editor, "nguyen-van-an", Some(photo.id)).await,
        Err(PipelineError::Core(CoreError::Validation(_)))
    );

    media::moderate(h.store.as_ref(), &h.editor, photo.id, MediaState::Published)
        .await
        .unwrap();

    assert_matches!(
        avatar::set_avatar(h.store.as_ref(), &h.member, "nguyen-van-an", Some(photo.id)).await,
        Err(PipelineError::Core(CoreError::Forbidden(_)))
    );
    assert_matches!(
        avatar::set_avatar(h.store.as_ref(), &h.editor, "le-thi-b", Some(photo.id)).await,
        Err(PipelineError::Core(CoreError::Validation(_)))
    );

    let url = avatar::set_avatar(h.store.as_ref(), &h.editor, "nguyen-van-an", Some(photo.id))
        .await
        .unwrap();
    assert_eq!(url.as_deref(), Some(photo.storage_url.as_str()));
    let people = h.store.people();
    let an = people.iter().find(|p| p.handle == "nguyen-van-an").unwrap();
    assert_eq!(an.avatar_url, url);

    let cleared = avatar::set_avatar(h.store.as_ref(), &h.admin, "nguyen-van-an", None)
        .await
        .unwrap();
    assert!(cleared.is_none());

    let actions: Vec<_> = h.store.audit_logs().into_iter().map(|a| a.action).collect();
    assert!(actions.contains(&"person.set_avatar".to_string()));
    assert!(actions.contains(&"person.clear_avatar".to_string()));
}

#[tokio::test]
async fn avatar_for_unknown_person_is_not_found() {
    let h = Harness::new();
    assert_matches!(
        avatar::set_avatar(h.store.as_ref(), &h.admin, "khong-co", None).await,
        Err(PipelineError::Core(CoreError::NotFound { .. }))
    );
}

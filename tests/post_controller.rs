mod common;

use std::path::PathBuf;

use blog_admin::post::post_index::{Notice, PostCommand, run};
use blog_admin::post::post_store::StoreView;
use blog_admin::utils::image::decode;
use blog_admin::{ClientError, ImageChoice, PostField, PostForm};
use common::spawn_server;

fn form(title: &str, body: &str) -> PostForm {
    PostForm {
        title: title.into(),
        body: body.into(),
        image: ImageChoice::Keep,
    }
}

fn temp_image(bytes: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}.jpg", uuid::Uuid::new_v4()));
    std::fs::write(&path, bytes).unwrap();
    path
}

#[actix_web::test]
async fn test_confirmed_calls_patch_the_store() {
    let server = spawn_server();
    let mut controller = server.controller();
    controller.load().await.unwrap();
    assert_eq!(controller.store().view(), StoreView::Empty);

    let a = controller.create(form("A", "a")).await.unwrap();
    let b = controller.create(form("B", "b")).await.unwrap();
    let c = controller.create(form("C", "c")).await.unwrap();
    assert_eq!(controller.store().len(), 3);

    let edited = controller.edit(&b.id, form("B2", "b2")).await.unwrap();
    assert_eq!(controller.find(&b.id), Some(&edited));

    controller.delete(&a.id).await.unwrap();
    let ids: Vec<&str> = controller.store().posts().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec![b.id.as_str(), c.id.as_str()]);
    assert_eq!(controller.find(&c.id), Some(&c));

    // The local cache matches a fresh fetch
    let mut fresh = server.controller();
    fresh.load().await.unwrap();
    assert_eq!(fresh.store().posts(), controller.store().posts());
}

#[actix_web::test]
async fn test_failed_calls_leave_store_untouched() {
    let server = spawn_server();
    let mut controller = server.controller();
    controller.create(form("Keep", "me")).await.unwrap();
    controller.load().await.unwrap();
    let id = controller.store().posts()[0].id.clone();
    let before = controller.store().posts().to_vec();

    server.api.set_failing(true);

    assert!(matches!(
        controller.create(form("New", "post")).await,
        Err(ClientError::CreateError(_))
    ));
    assert!(matches!(
        controller.edit(&id, form("Changed", "body")).await,
        Err(ClientError::UpdateError(_))
    ));
    assert!(matches!(controller.delete(&id).await, Err(ClientError::DeleteError(_))));

    assert_eq!(controller.store().posts(), before.as_slice());
}

#[actix_web::test]
async fn test_validation_blocks_submission() {
    let server = spawn_server();
    let mut controller = server.controller();

    for (title, body, field) in [("", "body", PostField::Title), ("title", "  ", PostField::Body)] {
        match controller.create(form(title, body)).await {
            Err(ClientError::ValidationError(errors)) => assert!(errors.contains(field)),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
    match controller.edit("any", form("", "")).await {
        Err(ClientError::ValidationError(errors)) => assert_eq!(errors.len(), 2),
        other => panic!("expected validation error, got {:?}", other),
    }

    assert_eq!(server.api.request_count(), 0);
}

#[actix_web::test]
async fn test_image_choices() {
    let server = spawn_server();
    let mut controller = server.controller();
    let path = temp_image(&[0xFF, 0xD8, 0xFF, 0xE0, 7, 7, 7]);

    let created = controller
        .create(PostForm {
            image: ImageChoice::Replace(path.clone()),
            ..form("Pic", "with image")
        })
        .await
        .unwrap();
    let image = decode(&created.image_data).unwrap();
    assert_eq!(image.mime, "image/jpeg");
    assert_eq!(image.bytes, vec![0xFF, 0xD8, 0xFF, 0xE0, 7, 7, 7]);

    let kept = controller.edit(&created.id, form("Pic 2", "same image")).await.unwrap();
    assert_eq!(kept.image_data, created.image_data);

    let removed = controller
        .edit(
            &created.id,
            PostForm {
                image: ImageChoice::Remove,
                ..form("Pic 3", "no image")
            },
        )
        .await
        .unwrap();
    assert!(!removed.has_image());

    std::fs::remove_file(&path).unwrap();
}

#[actix_web::test]
async fn test_unreadable_image_is_read_error() {
    let server = spawn_server();
    let mut controller = server.controller();
    let missing = std::env::temp_dir().join(format!("{}.png", uuid::Uuid::new_v4()));

    let result = controller
        .create(PostForm {
            image: ImageChoice::Replace(missing),
            ..form("Pic", "missing file")
        })
        .await;

    assert!(matches!(result, Err(ClientError::ReadError(_))));
    assert_eq!(server.api.request_count(), 0);
}

#[actix_web::test]
async fn test_commands_report_notices() {
    let server = spawn_server();
    let mut controller = server.controller();

    let notice = run(PostCommand::List, &mut controller).await;
    assert_eq!(notice, Notice::Success("No posts available.".into()));

    let notice = run(
        PostCommand::Create {
            title: "Hello".into(),
            body: "World".into(),
            image: None,
        },
        &mut controller,
    )
    .await;
    assert_eq!(notice, Notice::Success("Post \"Hello\" created successfully!".into()));
    let id = controller.store().posts()[0].id.clone();

    // Only the title is given; the body is prefilled from the current post
    let notice = run(
        PostCommand::Edit {
            id: id.clone(),
            title: Some("Hello again".into()),
            body: None,
            image: None,
            remove_image: false,
        },
        &mut controller,
    )
    .await;
    assert!(!notice.is_error(), "{}", notice.message());
    assert_eq!(controller.find(&id).unwrap().body, "World");

    let notice = run(PostCommand::Show { id: id.clone() }, &mut controller).await;
    assert!(notice.message().starts_with("Hello again"));

    let notice = run(PostCommand::Delete { id: id.clone() }, &mut controller).await;
    assert_eq!(
        notice,
        Notice::Success("Post \"Hello again\" deleted successfully!".into())
    );
    assert!(controller.store().is_empty());

    server.api.set_failing(true);
    let notice = run(PostCommand::List, &mut controller).await;
    assert_eq!(
        notice,
        Notice::Error("Failed to load posts. Please try again later.".into())
    );
    assert!(!notice.message().contains("500"));
}

#[actix_web::test]
async fn test_edit_unknown_post_is_reported() {
    let server = spawn_server();
    let mut controller = server.controller();

    let notice = run(
        PostCommand::Edit {
            id: "ghost".into(),
            title: Some("t".into()),
            body: None,
            image: None,
            remove_image: false,
        },
        &mut controller,
    )
    .await;
    assert_eq!(notice, Notice::Error("Post ghost was not found.".into()));
}

#[actix_web::test]
async fn test_edit_with_every_field_skips_the_prefill_fetch() {
    let server = spawn_server();
    let mut controller = server.controller();
    let post = controller.create(form("Full", "edit")).await.unwrap();
    let before = server.api.request_count();

    let notice = run(
        PostCommand::Edit {
            id: post.id.clone(),
            title: Some("Full 2".into()),
            body: Some("edit 2".into()),
            image: None,
            remove_image: true,
        },
        &mut controller,
    )
    .await;

    assert_eq!(notice, Notice::Success("Post \"Full 2\" updated successfully!".into()));
    // Only the PATCH reaches the server
    assert_eq!(server.api.request_count(), before + 1);
    assert!(!controller.find(&post.id).unwrap().has_image());
}

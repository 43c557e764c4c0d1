//! SQLite 存储持久化测试

mod common;

use std::sync::Arc;

use prompt_injector::{
    ConfigHandle, InjectionKind, InjectionService, KvStore, SqliteKvStore,
};

#[tokio::test]
async fn test_record_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("injections.db");
    let event = common::test_event("qq:1");

    {
        let store = Arc::new(SqliteKvStore::new(&db_path).unwrap());
        let service = InjectionService::new(
            store,
            ConfigHandle::in_memory(common::test_config()),
        );
        service
            .add_injection(&event, InjectionKind::Task, "翻译文档", 3)
            .await
            .unwrap();
    }

    // 重新打开数据库，记录仍在
    let store = Arc::new(SqliteKvStore::new(&db_path).unwrap());
    let service = InjectionService::new(
        store,
        ConfigHandle::in_memory(common::test_config()),
    );

    let injections = service.list_injections(&event).await.unwrap();
    assert_eq!(injections.len(), 1);
    assert_eq!(injections[0].content, "翻译文档");
    assert_eq!(injections[0].turns_left, 3);
}

#[tokio::test]
async fn test_countdown_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("injections.db");
    let event = common::test_event("qq:1");

    {
        let store = Arc::new(SqliteKvStore::new(&db_path).unwrap());
        let service = InjectionService::new(
            store,
            ConfigHandle::in_memory(common::test_config()),
        );
        service
            .add_injection(&event, InjectionKind::Task, "翻译文档", 2)
            .await
            .unwrap();
        let text = service.build_injection_text(&event).await.unwrap();
        assert!(text.contains("翻译文档"));
    }

    let store = Arc::new(SqliteKvStore::new(&db_path).unwrap());
    let service = InjectionService::new(
        store.clone(),
        ConfigHandle::in_memory(common::test_config()),
    );

    let injections = service.list_injections(&event).await.unwrap();
    assert_eq!(injections[0].turns_left, 1);

    // 最后一轮耗尽后记录从数据库删除
    service.build_injection_text(&event).await.unwrap();
    assert!(store.get(&event.storage_key()).await.unwrap().is_none());
}

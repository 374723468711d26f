use chrono::NaiveDate;
use inventory_api::domain::category::NewCategory;
use inventory_api::domain::history::NewHistoryEntry;
use inventory_api::domain::item::NewItem;
use inventory_api::domain::types::{
    CategoryId, CategoryName, Description, HistoryOperation, ImageReference, ItemId, ItemName,
    TableName, UserId,
};
use inventory_api::repository::{
    CategoryReader, CategoryWriter, DieselRepository, HistoryListQuery, HistoryReader,
    HistoryWriter, ItemListQuery, ItemReader, ItemWriter,
};

mod common;

fn new_category(name: &str) -> NewCategory {
    NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        description: None,
    }
}

fn new_item(name: &str, category_id: Option<CategoryId>) -> NewItem {
    NewItem {
        name: ItemName::new(name).expect("valid item name"),
        category_id,
        description: None,
    }
}

#[test]
fn category_crud_round_trip() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let created = repo
        .create_category(&NewCategory {
            name: CategoryName::new("Tools").unwrap(),
            description: Some(Description::new("hand tools").unwrap()),
        })
        .expect("should create category");
    assert_eq!(created.description.as_ref().unwrap().as_str(), "hand tools");

    let updated = repo
        .update_category(created.id, &new_category("Garden"))
        .expect("should update")
        .expect("category exists");
    assert_eq!(updated.name.as_str(), "Garden");
    assert!(updated.description.is_none());

    let listed = repo.list_categories().unwrap();
    assert_eq!(listed, vec![updated]);

    assert_eq!(repo.delete_category(created.id).unwrap(), 1);
    assert!(repo.get_category_by_id(created.id).unwrap().is_none());
    assert_eq!(repo.delete_category(created.id).unwrap(), 0);
}

#[test]
fn update_missing_category_returns_none() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let missing = CategoryId::new(99).unwrap();
    assert!(
        repo.update_category(missing, &new_category("Ghost"))
            .unwrap()
            .is_none()
    );
}

#[test]
fn delete_category_orphans_items() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let tools = repo.create_category(&new_category("Tools")).unwrap();
    let hammer = repo.create_item(&new_item("Hammer", Some(tools.id))).unwrap();

    repo.delete_category(tools.id).expect("should delete category");

    let hammer = repo
        .get_item_by_id(hammer.id)
        .unwrap()
        .expect("item survives category deletion");
    assert!(hammer.category_id.is_none());
}

#[test]
fn items_filter_and_count_by_category() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let tools = repo.create_category(&new_category("Tools")).unwrap();
    let paint = repo.create_category(&new_category("Paint")).unwrap();
    repo.create_item(&new_item("Hammer", Some(tools.id))).unwrap();
    repo.create_item(&new_item("Saw", Some(tools.id))).unwrap();
    repo.create_item(&new_item("Rope", None)).unwrap();

    let tool_items = repo
        .list_items(ItemListQuery::default().category(tools.id))
        .unwrap();
    assert_eq!(tool_items.len(), 2);
    assert!(
        repo.list_items(ItemListQuery::default().category(paint.id))
            .unwrap()
            .is_empty()
    );
    assert_eq!(repo.list_items(ItemListQuery::default()).unwrap().len(), 3);

    let mut counts = repo.count_items_by_category().unwrap();
    counts.sort_by_key(|(category_id, _)| *category_id);
    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].0, None);
    assert_eq!(counts[0].1.get(), 1);
    assert_eq!(counts[1].0, Some(tools.id));
    assert_eq!(counts[1].1.get(), 2);
}

#[test]
fn unknown_category_reference_is_rejected_by_the_database() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let result = repo.create_item(&new_item("Orphan", Some(CategoryId::new(42).unwrap())));

    assert!(result.is_err());
}

#[test]
fn image_file_update_touches_only_existing_rows() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let item = repo.create_item(&new_item("Lamp", None)).unwrap();
    assert!(item.image_file.is_none());

    let local = ImageReference::new("0-1-20250101T000000000000.png").unwrap();
    assert!(repo.update_item_image_file(item.id, &local).unwrap());

    // A regular update leaves the image in place.
    let renamed = repo
        .update_item(item.id, &new_item("Desk lamp", None))
        .unwrap()
        .unwrap();
    assert_eq!(renamed.image_file, Some(local));

    let missing = ItemId::new(999).unwrap();
    let remote = ImageReference::new("drv_abc").unwrap();
    assert!(!repo.update_item_image_file(missing, &remote).unwrap());
    assert!(repo.get_item_by_id(missing).unwrap().is_none());
}

#[test]
fn history_filters_and_paginates() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let day = |d: u32, h: u32| {
        NaiveDate::from_ymd_opt(2025, 6, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    };
    let entries = [
        ("alice", TableName::Item, day(1, 9)),
        ("alice", TableName::Category, day(2, 9)),
        ("bob", TableName::Item, day(2, 18)),
        ("alice", TableName::Item, day(3, 9)),
    ];
    for (user, table, timestamp) in entries {
        repo.log_history(&NewHistoryEntry::new(
            HistoryOperation::Update,
            table,
            UserId::new(user).unwrap(),
            Some(1),
            timestamp,
        ))
        .expect("should log history");
    }

    let all = repo.list_history(HistoryListQuery::default()).unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[0].timestamp, day(3, 9));
    assert_eq!(all[3].timestamp, day(1, 9));
    assert_eq!(all[0].id, "Item:update:alice:20250603T090000000000000");

    let alice_items = repo
        .list_history(HistoryListQuery::default().user("alice").table(TableName::Item))
        .unwrap();
    assert_eq!(alice_items.len(), 2);

    let second_day = repo
        .list_history(HistoryListQuery::default().between(Some(day(2, 0)), Some(day(2, 23))))
        .unwrap();
    assert_eq!(second_day.len(), 2);
    assert_eq!(second_day[0].user_id.as_str(), "bob");

    let page = repo
        .list_history(HistoryListQuery::default().paginate(2, 1))
        .unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].timestamp, day(2, 18));
}

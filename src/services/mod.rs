pub mod notice_store;

pub use notice_store::NoticeStore;

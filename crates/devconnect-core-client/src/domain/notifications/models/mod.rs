// devconnect-core-client/devconnect-core-client
//
// Copyright: 2025, Marc Bauer <mb@nesium.com>
// License: Mozilla Public License v2.0 (MPL v2.0)

pub use notification::{
    classify, Notification, NotificationCategory, NotificationId, NotificationPayload,
    NotificationSender, RelatedData, ResponseStatus,
};

mod notification;

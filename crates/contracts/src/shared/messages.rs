use serde::{Deserialize, Serialize};

// ============================================================================
// Localized text
// ============================================================================

/// Static text in both supported languages. Arabic is the primary language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalizedText {
    pub ar: &'static str,
    pub en: &'static str,
}

impl LocalizedText {
    pub const fn new(ar: &'static str, en: &'static str) -> Self {
        Self { ar, en }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    Default,
    Destructive,
}

/// Static notification template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Message {
    pub title: LocalizedText,
    pub description: LocalizedText,
    pub variant: NotificationVariant,
}

impl Message {
    pub const fn success(title: LocalizedText, description: LocalizedText) -> Self {
        Self {
            title,
            description,
            variant: NotificationVariant::Default,
        }
    }

    pub const fn failure(title: LocalizedText, description: LocalizedText) -> Self {
        Self {
            title,
            description,
            variant: NotificationVariant::Destructive,
        }
    }

    pub fn notification(&self) -> Notification {
        Notification::from(*self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    pub title: String,
    pub description: String,
}

/// User-facing notification as it travels over the wire.
///
/// `title` and `description` are Arabic; `en` carries the English rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub variant: NotificationVariant,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<Translation>,
}

impl Notification {
    /// Keep the title of `message` but replace the description.
    pub fn with_description(message: &Message, description: &Message) -> Self {
        Self {
            title: message.title.ar.to_string(),
            description: description.description.ar.to_string(),
            variant: message.variant,
            en: Some(Translation {
                title: message.title.en.to_string(),
                description: description.description.en.to_string(),
            }),
        }
    }
}

impl From<Message> for Notification {
    fn from(m: Message) -> Self {
        Self {
            title: m.title.ar.to_string(),
            description: m.description.ar.to_string(),
            variant: m.variant,
            en: Some(Translation {
                title: m.title.en.to_string(),
                description: m.description.en.to_string(),
            }),
        }
    }
}

/// Result of a mutation together with the toast the UI shows for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledged<T> {
    pub item: T,
    pub notification: Notification,
}

impl<T> Acknowledged<T> {
    pub fn new(item: T, message: Message) -> Self {
        Self {
            item,
            notification: message.notification(),
        }
    }
}

// ============================================================================
// Common titles
// ============================================================================

const ERROR: LocalizedText = LocalizedText::new("خطأ", "Error");
const WARNING: LocalizedText = LocalizedText::new("تنبيه", "Warning");
const ADDED: LocalizedText = LocalizedText::new("تم الإضافة", "Added");
const UPDATED: LocalizedText = LocalizedText::new("تم التحديث", "Updated");
const DELETED: LocalizedText = LocalizedText::new("تم الحذف", "Deleted");

// ============================================================================
// Validation
// ============================================================================

pub const MISSING_ENTITY_FIELDS: Message = Message::failure(
    LocalizedText::new("بيانات ناقصة", "Missing data"),
    LocalizedText::new(
        "الرجاء ملء جميع الحقول المطلوبة",
        "Please fill in all required fields",
    ),
);

pub const INVALID_PRICE: Message = Message::failure(
    LocalizedText::new("بيانات غير صالحة", "Invalid data"),
    LocalizedText::new(
        "الرجاء إدخال سعر صحيح",
        "Please enter a valid, non-negative price",
    ),
);

pub const UNKNOWN_LOCATION: Message = Message::failure(
    LocalizedText::new("بيانات غير صالحة", "Invalid data"),
    LocalizedText::new(
        "الموقع المحدد غير موجود في قائمة الولايات",
        "The selected location is not a known governorate or wilayat",
    ),
);

pub const MISSING_REGISTRATION_FIELDS: Message = Message::failure(
    ERROR,
    LocalizedText::new(
        "يرجى ملء جميع الحقول المطلوبة",
        "Please fill in all required fields",
    ),
);

pub const PASSWORD_MISMATCH: Message = Message::failure(
    ERROR,
    LocalizedText::new("كلمات المرور غير متطابقة", "Passwords do not match"),
);

pub const INVALID_PHONE_REGISTRATION: Message = Message::failure(
    WARNING,
    LocalizedText::new(
        "يرجى إدخال رقم هاتف عماني صحيح (يبدأ بـ 7 أو 9 ويتكون من 8 أرقام)",
        "Please enter a valid Omani phone number (8 digits starting with 7 or 9)",
    ),
);

pub const INVALID_PHONE_PROFILE: Message = Message::failure(
    WARNING,
    LocalizedText::new(
        "يرجى إدخال رقم هاتف عماني صحيح",
        "Please enter a valid Omani phone number",
    ),
);

pub const WILAYAT_OUTSIDE_GOVERNORATE: Message = Message::failure(
    ERROR,
    LocalizedText::new(
        "الولاية المختارة لا تتبع المحافظة المحددة",
        "The selected wilayat does not belong to the selected governorate",
    ),
);

pub const DELETE_NOT_CONFIRMED: Message = Message::failure(
    WARNING,
    LocalizedText::new("يرجى تأكيد الحذف أولاً", "Please confirm the deletion first"),
);

pub const INVALID_IDENTIFIER: Message = Message::failure(
    ERROR,
    LocalizedText::new("المعرّف غير صالح", "Invalid identifier"),
);

// ============================================================================
// Access
// ============================================================================

pub const NOT_AUTHORIZED: Message = Message::failure(
    LocalizedText::new("غير مصرح", "Not authorized"),
    LocalizedText::new(
        "ليس لديك صلاحيات الوصول لهذه الصفحة",
        "You do not have permission to access this page",
    ),
);

pub const SIGN_IN_REQUIRED: Message = Message::failure(
    LocalizedText::new("يلزم تسجيل الدخول", "Sign-in required"),
    LocalizedText::new("يرجى تسجيل الدخول للمتابعة", "Please sign in to continue"),
);

// ============================================================================
// Auth
// ============================================================================

pub const SIGN_IN_SUCCESS: Message = Message::success(
    LocalizedText::new("مرحباً", "Welcome"),
    LocalizedText::new("تم تسجيل الدخول بنجاح", "Signed in successfully"),
);

pub const SIGN_OUT_SUCCESS: Message = Message::success(
    LocalizedText::new("تم تسجيل الخروج", "Signed out"),
    LocalizedText::new("تم تسجيل الخروج بنجاح", "Signed out successfully"),
);

pub const SIGN_IN_FAILED: Message = Message::failure(
    LocalizedText::new("خطأ في تسجيل الدخول", "Sign-in error"),
    LocalizedText::new(
        "حدث خطأ أثناء تسجيل الدخول",
        "Something went wrong while signing in",
    ),
);

pub const REGISTRATION_SUCCESS: Message = Message::success(
    LocalizedText::new("تم إنشاء الحساب بنجاح! 🎉", "Account created! 🎉"),
    LocalizedText::new("مرحباً بك في بوتيك الجمال", "Welcome to Beauty Boutique"),
);

pub const REGISTRATION_FAILED: Message = Message::failure(
    LocalizedText::new("خطأ في إنشاء الحساب", "Sign-up error"),
    LocalizedText::new(
        "حدث خطأ أثناء إنشاء الحساب",
        "Something went wrong while creating the account",
    ),
);

pub const BAD_CREDENTIALS: Message = Message::failure(
    LocalizedText::new("خطأ في تسجيل الدخول", "Sign-in error"),
    LocalizedText::new(
        "البريد الإلكتروني أو كلمة المرور غير صحيحة",
        "Incorrect email or password",
    ),
);

pub const USER_NOT_FOUND: Message = Message::failure(
    LocalizedText::new("خطأ في تسجيل الدخول", "Sign-in error"),
    LocalizedText::new("هذا الحساب غير موجود", "This account does not exist"),
);

pub const TOO_MANY_REQUESTS: Message = Message::failure(
    LocalizedText::new("خطأ في تسجيل الدخول", "Sign-in error"),
    LocalizedText::new(
        "تم تجاوز عدد المحاولات المسموحة. يرجى المحاولة لاحقاً",
        "Too many attempts. Please try again later",
    ),
);

pub const EMAIL_ALREADY_IN_USE: Message = Message::failure(
    LocalizedText::new("خطأ في إنشاء الحساب", "Sign-up error"),
    LocalizedText::new(
        "البريد الإلكتروني مستخدم بالفعل",
        "This email address is already in use",
    ),
);

pub const WEAK_PASSWORD: Message = Message::failure(
    LocalizedText::new("خطأ في إنشاء الحساب", "Sign-up error"),
    LocalizedText::new(
        "كلمة المرور ضعيفة، يجب أن تتكون من 6 أحرف على الأقل",
        "Password is too weak, use at least 6 characters",
    ),
);

pub const INVALID_EMAIL: Message = Message::failure(
    LocalizedText::new("خطأ في إنشاء الحساب", "Sign-up error"),
    LocalizedText::new("البريد الإلكتروني غير صالح", "Invalid email address"),
);

pub const SESSION_EXPIRED: Message = Message::failure(
    LocalizedText::new("انتهت الجلسة", "Session expired"),
    LocalizedText::new(
        "يرجى تسجيل الدخول مرة أخرى",
        "Please sign in again",
    ),
);

// ============================================================================
// Profile
// ============================================================================

pub const PROFILE_NOT_FOUND: Message = Message::failure(
    ERROR,
    LocalizedText::new("لم يتم العثور على الملف الشخصي", "Profile not found"),
);

pub const PROFILE_PERSISTENCE_UNAVAILABLE: Message = Message::failure(
    LocalizedText::new("غير متاح", "Not available"),
    LocalizedText::new(
        "حفظ تعديلات الملف الشخصي غير متاح حالياً",
        "Saving profile changes is not available yet",
    ),
);

// ============================================================================
// Entity operations
// ============================================================================

pub const LOAD_FAILED: Message = Message::failure(
    ERROR,
    LocalizedText::new(
        "حدث خطأ أثناء تحميل البيانات",
        "Something went wrong while loading data",
    ),
);

pub const ENTITY_NOT_FOUND: Message = Message::failure(
    ERROR,
    LocalizedText::new("العنصر غير موجود", "Item not found"),
);

pub const ARTIST_ADDED: Message = Message::success(
    ADDED,
    LocalizedText::new("تم إضافة الآرتست بنجاح", "Artist added successfully"),
);

pub const ARTIST_ADD_FAILED: Message = Message::failure(
    ERROR,
    LocalizedText::new(
        "حدث خطأ أثناء إضافة الآرتست",
        "Something went wrong while adding the artist",
    ),
);

pub const ARTIST_UPDATED: Message = Message::success(
    UPDATED,
    LocalizedText::new(
        "تم تحديث بيانات الآرتست بنجاح",
        "Artist updated successfully",
    ),
);

pub const ARTIST_UPDATE_FAILED: Message = Message::failure(
    ERROR,
    LocalizedText::new(
        "حدث خطأ أثناء تحديث الآرتست",
        "Something went wrong while updating the artist",
    ),
);

pub const ARTIST_DELETED: Message = Message::success(
    DELETED,
    LocalizedText::new("تم حذف الآرتست بنجاح", "Artist deleted successfully"),
);

pub const SPACE_ADDED: Message = Message::success(
    ADDED,
    LocalizedText::new("تم إضافة المساحة بنجاح", "Space added successfully"),
);

pub const SPACE_ADD_FAILED: Message = Message::failure(
    ERROR,
    LocalizedText::new(
        "حدث خطأ أثناء إضافة المساحة",
        "Something went wrong while adding the space",
    ),
);

pub const SPACE_UPDATED: Message = Message::success(
    UPDATED,
    LocalizedText::new(
        "تم تحديث بيانات المساحة بنجاح",
        "Space updated successfully",
    ),
);

pub const SPACE_UPDATE_FAILED: Message = Message::failure(
    ERROR,
    LocalizedText::new(
        "حدث خطأ أثناء تحديث المساحة",
        "Something went wrong while updating the space",
    ),
);

pub const SPACE_DELETED: Message = Message::success(
    DELETED,
    LocalizedText::new("تم حذف المساحة بنجاح", "Space deleted successfully"),
);

pub const DELETE_FAILED: Message = Message::failure(
    ERROR,
    LocalizedText::new(
        "حدث خطأ أثناء الحذف",
        "Something went wrong while deleting",
    ),
);

pub const DATA_RELOADED: Message = Message::success(
    UPDATED,
    LocalizedText::new("تم تحديث البيانات", "Data reloaded"),
);

/// Entity operations that surface a notification on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Load,
    AddArtist,
    UpdateArtist,
    DeleteArtist,
    AddSpace,
    UpdateSpace,
    DeleteSpace,
}

impl Operation {
    pub fn success(&self) -> Message {
        match self {
            Operation::Load => DATA_RELOADED,
            Operation::AddArtist => ARTIST_ADDED,
            Operation::UpdateArtist => ARTIST_UPDATED,
            Operation::DeleteArtist => ARTIST_DELETED,
            Operation::AddSpace => SPACE_ADDED,
            Operation::UpdateSpace => SPACE_UPDATED,
            Operation::DeleteSpace => SPACE_DELETED,
        }
    }

    /// Generic failure shown when the store rejects the operation
    pub fn failure(&self) -> Message {
        match self {
            Operation::Load => LOAD_FAILED,
            Operation::AddArtist => ARTIST_ADD_FAILED,
            Operation::UpdateArtist => ARTIST_UPDATE_FAILED,
            Operation::AddSpace => SPACE_ADD_FAILED,
            Operation::UpdateSpace => SPACE_UPDATE_FAILED,
            Operation::DeleteArtist | Operation::DeleteSpace => DELETE_FAILED,
        }
    }
}

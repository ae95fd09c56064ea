//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Every table
//! keeps the columns queries filter or sort on, plus a `document` column
//! holding the serialised aggregate.

diesel::table! {
    /// Accounts.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Lowercased login email, unique.
        email -> Varchar,
        /// SHA-256 digest of the pending verification token.
        verification_digest -> Nullable<Bpchar>,
        /// SHA-256 digest of the pending password reset token.
        reset_digest -> Nullable<Bpchar>,
        /// Serialised `User`.
        document -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Renovation projects.
    projects (id) {
        /// Primary key.
        id -> Uuid,
        /// Owning account.
        owner_id -> Uuid,
        /// Unlisted share token.
        share_token -> Bpchar,
        /// Title slug, unique across projects.
        slug -> Varchar,
        /// Gallery slug, set on first publication.
        public_slug -> Nullable<Varchar>,
        /// Listed in the public gallery.
        is_published -> Bool,
        /// Last publication instant.
        published_at -> Nullable<Timestamptz>,
        /// `private`, `contractors`, or `public`.
        visibility -> Varchar,
        /// Lifecycle status.
        status -> Varchar,
        /// Serialised `Project`.
        document -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contractor profiles.
    contractors (id) {
        /// Primary key.
        id -> Uuid,
        /// Owning account, unique.
        user_id -> Uuid,
        /// Directory slug, unique.
        slug -> Varchar,
        /// Listed in the directory.
        is_active -> Bool,
        /// Serialised `Contractor`.
        document -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Conversations between users.
    conversations (id) {
        /// Primary key.
        id -> Uuid,
        /// Participating accounts.
        participants -> Array<Uuid>,
        /// Project the conversation is about.
        project_id -> Nullable<Uuid>,
        /// Whether the conversation is open.
        is_active -> Bool,
        /// Serialised `Conversation`.
        document -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last activity timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Messages inside conversations.
    messages (id) {
        /// Primary key.
        id -> Uuid,
        /// Parent conversation.
        conversation_id -> Uuid,
        /// Serialised `Message`.
        document -> Jsonb,
        /// Send instant.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Contact form submissions.
    contact_messages (id) {
        /// Primary key.
        id -> Uuid,
        /// Serialised `ContactMessage`.
        document -> Jsonb,
        /// Submission instant.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Landing image overrides keyed by slot.
    landing_assets (key) {
        /// Slot key.
        key -> Varchar,
        /// Serialised `LandingAsset`.
        document -> Jsonb,
        /// Last edit instant.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Singleton site settings (specialists section, gallery video).
    site_settings (key) {
        /// Setting key.
        key -> Varchar,
        /// Serialised setting.
        document -> Jsonb,
        /// Last edit instant.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(projects -> users (owner_id));
diesel::joinable!(contractors -> users (user_id));
diesel::joinable!(messages -> conversations (conversation_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    projects,
    contractors,
    conversations,
    messages,
    contact_messages,
    landing_assets,
    site_settings,
);

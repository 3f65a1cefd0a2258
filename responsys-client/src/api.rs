//! Remote operations.
//!
//! Each operation converts its arguments to wire form, invokes the service
//! method of the same name and wraps the raw result. Everything except the
//! login family first makes sure a session is installed.

use crate::client::InteractClient;
use crate::error::{InteractError, InteractResult};
use crate::transport::Transport;
use responsys_types::{
    CustomEvent, DeleteResult, FolderResult, FromWire, InteractObject, InteractType,
    ListMergeRule, LoginResult, MergeResult, QueryColumn, RecipientData, RecipientResult,
    RecordData, ServerAuthResult, TriggerResult, UpdateOnMatch, WireObject, WireStruct,
    WireValue,
};

fn unexpected(method: &str, expected: &'static str, found: &WireValue) -> InteractError {
    InteractError::UnexpectedResponse {
        method: method.to_string(),
        expected,
        found: found.kind(),
    }
}

fn as_struct<'a>(method: &str, value: &'a WireValue) -> InteractResult<&'a WireStruct> {
    value
        .as_struct()
        .ok_or_else(|| unexpected(method, "struct", value))
}

fn wrap_one<R: FromWire>(method: &str, value: &WireValue) -> InteractResult<R> {
    Ok(R::from_wire(as_struct(method, value)?)?)
}

/// Accepts either a single structure or a list of them.
fn wrap_many<R: FromWire>(method: &str, value: &WireValue) -> InteractResult<Vec<R>> {
    match value {
        WireValue::List(items) => items.iter().map(|item| wrap_one(method, item)).collect(),
        single => Ok(vec![wrap_one(method, single)?]),
    }
}

fn expect_bool(method: &str, value: &WireValue) -> InteractResult<bool> {
    value.as_bool().ok_or_else(|| unexpected(method, "bool", value))
}

fn record_data(method: &str, value: &WireValue) -> InteractResult<RecordData> {
    Ok(RecordData::from_wire(as_struct(method, value)?)?)
}

fn text_list<S: AsRef<str>>(values: &[S]) -> WireValue {
    WireValue::List(
        values
            .iter()
            .map(|v| WireValue::Text(v.as_ref().to_string()))
            .collect(),
    )
}

impl<T: Transport> InteractClient<T> {
    fn wire<O: WireObject>(&self, object: &O) -> WireValue {
        WireValue::Struct(object.to_wire(self.transport()))
    }

    // ── Session management ──────────────────────────────────────

    /// `login`: authenticates with username and password.
    ///
    /// This does not install the returned session; use
    /// [`connect`](InteractClient::connect) for that.
    pub fn login(&mut self, username: &str, password: &str) -> InteractResult<LoginResult> {
        let result = self.call("login", vec![username.into(), password.into()])?;
        wrap_one("login", &result)
    }

    /// `logout`: ends the session carried by the current header.
    pub fn logout(&mut self) -> InteractResult<bool> {
        let result = self.call("logout", Vec::new())?;
        expect_bool("logout", &result)
    }

    /// `loginWithCertificate`: second half of certificate authentication.
    pub fn login_with_certificate(
        &mut self,
        encrypted_server_challenge: &str,
    ) -> InteractResult<LoginResult> {
        let result = self.call(
            "loginWithCertificate",
            vec![encrypted_server_challenge.into()],
        )?;
        wrap_one("loginWithCertificate", &result)
    }

    /// `authenticateServer`: first half of certificate authentication.
    pub fn authenticate_server(
        &mut self,
        username: &str,
        client_challenge: &str,
    ) -> InteractResult<ServerAuthResult> {
        let result = self.call(
            "authenticateServer",
            vec![username.into(), client_challenge.into()],
        )?;
        wrap_one("authenticateServer", &result)
    }

    // ── List management ─────────────────────────────────────────

    /// `mergeListMembers`
    pub fn merge_list_members(
        &mut self,
        list: &InteractObject,
        records: &RecordData,
        merge_rule: &ListMergeRule,
    ) -> InteractResult<MergeResult> {
        merge_rule.validate()?;
        self.ensure_session()?;
        let args = vec![self.wire(list), self.wire(records), self.wire(merge_rule)];
        let result = self.call("mergeListMembers", args)?;
        wrap_one("mergeListMembers", &result)
    }

    /// `mergeListMembersRIID`: like `mergeListMembers`, answering with the
    /// recipient id of the merged member.
    pub fn merge_list_members_riid(
        &mut self,
        list: &InteractObject,
        records: &RecordData,
        merge_rule: &ListMergeRule,
    ) -> InteractResult<RecipientResult> {
        merge_rule.validate()?;
        self.ensure_session()?;
        let args = vec![self.wire(list), self.wire(records), self.wire(merge_rule)];
        let result = self.call("mergeListMembersRIID", args)?;
        let response = as_struct("mergeListMembersRIID", &result)?;
        let recipient = response.get("recipientResult").unwrap_or(&WireValue::Null);
        wrap_one("mergeListMembersRIID", recipient)
    }

    /// `deleteListMembers`
    pub fn delete_list_members<S: AsRef<str>>(
        &mut self,
        list: &InteractObject,
        query_column: QueryColumn,
        ids_to_delete: &[S],
    ) -> InteractResult<Vec<DeleteResult>> {
        self.ensure_session()?;
        let args = vec![self.wire(list), query_column.into(), text_list(ids_to_delete)];
        let result = self.call("deleteListMembers", args)?;
        wrap_many("deleteListMembers", &result)
    }

    /// `retrieveListMembers`
    pub fn retrieve_list_members<S: AsRef<str>, F: AsRef<str>>(
        &mut self,
        list: &InteractObject,
        query_column: QueryColumn,
        field_list: &[F],
        ids_to_retrieve: &[S],
    ) -> InteractResult<RecordData> {
        self.ensure_session()?;
        let args = vec![
            self.wire(list),
            query_column.into(),
            text_list(field_list),
            text_list(ids_to_retrieve),
        ];
        let result = self.call("retrieveListMembers", args)?;
        let response = as_struct("retrieveListMembers", &result)?;
        let records = response.get("recordData").unwrap_or(&WireValue::Null);
        record_data("retrieveListMembers", records)
    }

    // ── Table management ────────────────────────────────────────

    /// `createTable`. Each field is a `Field` structure, typically an
    /// [`InteractType`] with `field_name` and `field_type` registered.
    pub fn create_table(
        &mut self,
        table: &InteractObject,
        fields: &[InteractType],
    ) -> InteractResult<bool> {
        self.ensure_session()?;
        let fields = WireValue::List(fields.iter().map(|f| self.wire(f)).collect());
        let args = vec![self.wire(table), fields];
        let result = self.call("createTable", args)?;
        expect_bool("createTable", &result)
    }

    /// `createTableWithPK`
    pub fn create_table_with_pk<S: AsRef<str>>(
        &mut self,
        table: &InteractObject,
        fields: &[InteractType],
        primary_keys: &[S],
    ) -> InteractResult<bool> {
        self.ensure_session()?;
        let fields = WireValue::List(fields.iter().map(|f| self.wire(f)).collect());
        let args = vec![self.wire(table), fields, text_list(primary_keys)];
        let result = self.call("createTableWithPK", args)?;
        expect_bool("createTableWithPK", &result)
    }

    /// `deleteTable`
    pub fn delete_table(&mut self, table: &InteractObject) -> InteractResult<bool> {
        self.ensure_session()?;
        let args = vec![self.wire(table)];
        let result = self.call("deleteTable", args)?;
        expect_bool("deleteTable", &result)
    }

    /// `truncateTable`
    pub fn truncate_table(&mut self, table: &InteractObject) -> InteractResult<bool> {
        self.ensure_session()?;
        let args = vec![self.wire(table)];
        let result = self.call("truncateTable", args)?;
        expect_bool("truncateTable", &result)
    }

    /// `deleteTableRecords`
    pub fn delete_table_records<S: AsRef<str>>(
        &mut self,
        table: &InteractObject,
        query_column: QueryColumn,
        ids_to_delete: &[S],
    ) -> InteractResult<Vec<DeleteResult>> {
        self.ensure_session()?;
        let args = vec![self.wire(table), query_column.into(), text_list(ids_to_delete)];
        let result = self.call("deleteTableRecords", args)?;
        wrap_many("deleteTableRecords", &result)
    }

    /// `mergeTableRecords`
    pub fn merge_table_records<S: AsRef<str>>(
        &mut self,
        table: &InteractObject,
        records: &RecordData,
        match_column_names: &[S],
    ) -> InteractResult<MergeResult> {
        self.ensure_session()?;
        let args = vec![
            self.wire(table),
            self.wire(records),
            text_list(match_column_names),
        ];
        let result = self.call("mergeTableRecords", args)?;
        wrap_one("mergeTableRecords", &result)
    }

    /// `mergeTableRecordsWithPK`
    pub fn merge_table_records_with_pk(
        &mut self,
        table: &InteractObject,
        records: &RecordData,
        insert_on_no_match: bool,
        update_on_match: UpdateOnMatch,
    ) -> InteractResult<MergeResult> {
        self.ensure_session()?;
        let args = vec![
            self.wire(table),
            self.wire(records),
            insert_on_no_match.into(),
            update_on_match.into(),
        ];
        let result = self.call("mergeTableRecordsWithPK", args)?;
        wrap_one("mergeTableRecordsWithPK", &result)
    }

    /// `retrieveTableRecords`
    pub fn retrieve_table_records<S: AsRef<str>, F: AsRef<str>>(
        &mut self,
        table: &InteractObject,
        query_column: QueryColumn,
        field_list: &[F],
        ids_to_retrieve: &[S],
    ) -> InteractResult<RecordData> {
        self.ensure_session()?;
        let args = vec![
            self.wire(table),
            query_column.into(),
            text_list(field_list),
            text_list(ids_to_retrieve),
        ];
        let result = self.call("retrieveTableRecords", args)?;
        record_data("retrieveTableRecords", &result)
    }

    // ── Profile extensions ──────────────────────────────────────

    /// `retrieveProfileExtensionRecords`. The service matches on
    /// [`QueryColumn::Riid`] unless told otherwise.
    pub fn retrieve_profile_extension_records<S: AsRef<str>, F: AsRef<str>>(
        &mut self,
        profile_extension: &InteractObject,
        query_column: QueryColumn,
        field_list: &[F],
        ids_to_retrieve: &[S],
    ) -> InteractResult<RecordData> {
        self.ensure_session()?;
        let args = vec![
            self.wire(profile_extension),
            query_column.into(),
            text_list(field_list),
            text_list(ids_to_retrieve),
        ];
        let result = self.call("retrieveProfileExtensionRecords", args)?;
        record_data("retrieveProfileExtensionRecords", &result)
    }

    /// `deleteProfileExtensionMembers`
    pub fn delete_profile_extension_members<S: AsRef<str>>(
        &mut self,
        profile_extension: &InteractObject,
        query_column: QueryColumn,
        ids_to_delete: &[S],
    ) -> InteractResult<Vec<DeleteResult>> {
        self.ensure_session()?;
        let args = vec![
            self.wire(profile_extension),
            query_column.into(),
            text_list(ids_to_delete),
        ];
        let result = self.call("deleteProfileExtensionMembers", args)?;
        wrap_many("deleteProfileExtensionMembers", &result)
    }

    /// `mergeIntoProfileExtension`
    pub fn merge_into_profile_extension(
        &mut self,
        profile_extension: &InteractObject,
        records: &RecordData,
        match_column: QueryColumn,
        insert_on_no_match: bool,
        update_on_match: UpdateOnMatch,
    ) -> InteractResult<Vec<RecipientResult>> {
        self.ensure_session()?;
        let args = vec![
            self.wire(profile_extension),
            self.wire(records),
            match_column.into(),
            insert_on_no_match.into(),
            update_on_match.into(),
        ];
        let result = self.call("mergeIntoProfileExtension", args)?;
        wrap_many("mergeIntoProfileExtension", &result)
    }

    // ── Campaign management ─────────────────────────────────────

    /// `triggerCustomEvent`
    pub fn trigger_custom_event(
        &mut self,
        event: &CustomEvent,
        recipients: &[RecipientData],
    ) -> InteractResult<Vec<TriggerResult>> {
        self.ensure_session()?;
        let recipients = WireValue::List(recipients.iter().map(|r| self.wire(r)).collect());
        let args = vec![self.wire(event), recipients];
        let result = self.call("triggerCustomEvent", args)?;
        wrap_many("triggerCustomEvent", &result)
    }

    // ── Folder management ───────────────────────────────────────

    /// `listFolders`
    pub fn list_folders(&mut self) -> InteractResult<Vec<FolderResult>> {
        self.ensure_session()?;
        let result = self.call("listFolders", Vec::new())?;
        match result {
            WireValue::Null => Ok(Vec::new()),
            other => wrap_many("listFolders", &other),
        }
    }
}

use indexmap::IndexMap;
use pretty_assertions::assert_eq;
use responsys_client::{Fault, InteractClient, InteractConfig, InteractError, MockTransport, Pod};
use responsys_types::{
    CustomEvent, FailedRecord, InteractObject, InteractType, ListMergeRule, QueryColumn,
    Recipient, RecipientData, RecordData, Row, UpdateOnMatch, WireStruct, WireValue,
};

fn client_with(transport: MockTransport) -> InteractClient<MockTransport> {
    InteractClient::new(InteractConfig::new("username", "password", Pod::Ws5), transport)
}

fn client() -> InteractClient<MockTransport> {
    client_with(MockTransport::new())
}

fn methods(client: &InteractClient<MockTransport>) -> Vec<&str> {
    client
        .transport()
        .calls()
        .iter()
        .map(|c| c.method.as_str())
        .collect()
}

fn list() -> InteractObject {
    InteractObject::new("folder", "list")
}

fn list_wire() -> WireValue {
    WireStruct::new("InteractObject")
        .with("folderName", "folder")
        .with("objectName", "list")
        .into()
}

fn records() -> RecordData {
    let mut row = Row::new();
    row.insert("EMAIL_ADDRESS_".into(), "a@example.com".into());
    row.insert("CITY_".into(), "Oslo".into());
    RecordData::from_rows([row]).unwrap()
}

fn delete_result(id: &str) -> WireValue {
    WireStruct::new("DeleteResult")
        .with("success", true)
        .with("id", id)
        .into()
}

fn merge_result() -> WireValue {
    WireStruct::new("MergeResult")
        .with("insertCount", 1i64)
        .with("updateCount", 0i64)
        .with("rejectedCount", 0i64)
        .with("totalCount", 1i64)
        .into()
}

fn record_data_wire() -> WireValue {
    WireStruct::new("RecordData")
        .with("fieldNames", vec!["RIID_", "CITY_"])
        .with(
            "records",
            vec![WireStruct::new("Record").with("fieldValues", vec!["42", "Oslo"])],
        )
        .into()
}

// ── Session gating ──────────────────────────────────────────────

#[test]
fn login_is_not_gated() {
    let mut client = client();
    let login = client.login("someuser", "somepassword").unwrap();

    assert_eq!(login.session_id, "mock-session-1");
    assert_eq!(methods(&client), ["login"]);
    assert!(client.session().is_none());
}

#[test]
fn logout_is_not_gated() {
    let mut client = client();
    assert!(client.logout().unwrap());
    assert_eq!(methods(&client), ["logout"]);
}

#[test]
fn operations_log_in_first() {
    let mut client = client();
    client.delete_table(&list()).unwrap_err();
    assert_eq!(methods(&client), ["login", "deleteTable"]);
}

#[test]
fn operations_reuse_session() {
    let mut transport = MockTransport::new();
    transport.respond("truncateTable", true).respond("truncateTable", true);
    let mut client = client_with(transport);

    assert!(client.truncate_table(&list()).unwrap());
    assert!(client.truncate_table(&list()).unwrap());
    assert_eq!(methods(&client), ["login", "truncateTable", "truncateTable"]);
}

#[test]
fn operations_renew_expired_session() {
    let mut transport = MockTransport::new();
    transport.respond("deleteTable", true);
    let mut client = client_with(transport);
    client.set_session_lifetime(chrono::Duration::seconds(-1));
    client.resume_session("stale");

    assert!(client.delete_table(&list()).unwrap());
    assert_eq!(methods(&client), ["logout", "login", "deleteTable"]);
}

#[test]
fn failed_login_stops_operation() {
    let mut transport = MockTransport::new();
    transport.fault("login", Fault::new("AccountFault", "bad password"));
    let mut client = client_with(transport);

    let err = client.list_folders().unwrap_err();
    assert!(matches!(err, InteractError::Authentication { .. }));
    assert_eq!(methods(&client), ["login"]);
}

// ── Certificate login ───────────────────────────────────────────

#[test]
fn authenticate_server_projects_challenges() {
    let mut transport = MockTransport::new();
    transport.respond(
        "authenticateServer",
        WireStruct::new("ServerAuthResult")
            .with("authSessionId", "auth-1")
            .with("encryptedClientChallenge", "abc")
            .with("serverChallenge", "def"),
    );
    let mut client = client_with(transport);

    let auth = client.authenticate_server("user", "challenge").unwrap();
    assert_eq!(auth.auth_session_id, "auth-1");
    assert_eq!(auth.server_challenge.as_deref(), Some("def"));
    assert_eq!(
        client.transport().last_args("authenticateServer").unwrap(),
        [WireValue::from("user"), WireValue::from("challenge")]
    );
}

#[test]
fn login_with_certificate_returns_session() {
    let mut transport = MockTransport::new();
    transport.respond(
        "loginWithCertificate",
        WireStruct::new("LoginResult").with("sessionId", "cert-session"),
    );
    let mut client = client_with(transport);

    let login = client.login_with_certificate("encrypted").unwrap();
    assert_eq!(login.session_id, "cert-session");
    assert_eq!(client.transport().call_count("login"), 0);
}

// ── Lists ───────────────────────────────────────────────────────

#[test]
fn delete_list_members_wraps_single_result() {
    let mut transport = MockTransport::new();
    transport.respond("deleteListMembers", delete_result("42"));
    let mut client = client_with(transport);

    let results = client
        .delete_list_members(&list(), QueryColumn::Riid, &["42"])
        .unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert_eq!(results[0].id, WireValue::from("42"));
}

#[test]
fn delete_list_members_keeps_every_result() {
    let mut transport = MockTransport::new();
    transport.respond(
        "deleteListMembers",
        vec![delete_result("1"), delete_result("2"), delete_result("3")],
    );
    let mut client = client_with(transport);

    let results = client
        .delete_list_members(&list(), QueryColumn::EmailAddress, &["1", "2", "3"])
        .unwrap();
    assert_eq!(results.len(), 3);
}

#[test]
fn delete_list_members_argument_wire_form() {
    let mut transport = MockTransport::new();
    transport.respond("deleteListMembers", delete_result("a@example.com"));
    let mut client = client_with(transport);

    client
        .delete_list_members(&list(), QueryColumn::EmailAddress, &["a@example.com"])
        .unwrap();
    assert_eq!(
        client.transport().last_args("deleteListMembers").unwrap(),
        [
            list_wire(),
            WireValue::from("EMAIL_ADDRESS"),
            WireValue::from(vec!["a@example.com"]),
        ]
    );
}

#[test]
fn merge_list_members_sends_rule_and_records() {
    let mut transport = MockTransport::new();
    transport.respond("mergeListMembers", merge_result());
    let mut client = client_with(transport);

    let result = client
        .merge_list_members(&list(), &records(), &ListMergeRule::default())
        .unwrap();
    assert_eq!(result.insert_count, 1);
    assert_eq!(result.failed(), Vec::<FailedRecord>::new());

    let args = client.transport().last_args("mergeListMembers").unwrap();
    assert_eq!(args.len(), 3);
    let data = args[1].as_struct().unwrap();
    assert_eq!(data.type_name(), "RecordData");
    assert_eq!(
        data.get("fieldNames"),
        Some(&WireValue::from(vec!["EMAIL_ADDRESS_", "CITY_"]))
    );
    let rule = args[2].as_struct().unwrap();
    assert_eq!(rule.type_name(), "ListMergeRule");
    assert_eq!(rule.get("matchColumnName1"), Some(&WireValue::from("Customer_Id_")));
}

#[test]
fn merge_list_members_rejects_rule_before_calling() {
    let mut client = client();
    let rule = ListMergeRule {
        match_column_name_1: String::new(),
        ..Default::default()
    };

    let err = client
        .merge_list_members(&list(), &records(), &rule)
        .unwrap_err();
    assert!(matches!(err, InteractError::Validation(_)));
    assert!(client.transport().calls().is_empty());
}

#[test]
fn merge_list_members_riid_reads_nested_result() {
    let mut transport = MockTransport::new();
    transport.respond(
        "mergeListMembersRIID",
        WireStruct::new("MergeListMembersRIIDResponse").with(
            "recipientResult",
            WireStruct::new("RecipientResult").with("recipientId", 1234i64),
        ),
    );
    let mut client = client_with(transport);

    let result = client
        .merge_list_members_riid(&list(), &records(), &ListMergeRule::default())
        .unwrap();
    assert_eq!(result.recipient_id, Some(1234));
    assert_eq!(result.error_message, None);
}

#[test]
fn retrieve_list_members_unwraps_record_data() {
    let mut transport = MockTransport::new();
    transport.respond(
        "retrieveListMembers",
        WireStruct::new("RetrieveListMembersResponse").with("recordData", record_data_wire()),
    );
    let mut client = client_with(transport);

    let data = client
        .retrieve_list_members(&list(), QueryColumn::Riid, &["CITY_"], &["42"])
        .unwrap();
    assert_eq!(data.field_names(), ["RIID_", "CITY_"]);

    let rows: Vec<Row> = data.rows().collect();
    let mut expected = IndexMap::new();
    expected.insert("RIID_".to_string(), WireValue::from("42"));
    expected.insert("CITY_".to_string(), WireValue::from("Oslo"));
    assert_eq!(rows, vec![expected]);
}

// ── Tables ──────────────────────────────────────────────────────

#[test]
fn create_table_sends_field_structures() {
    let mut transport = MockTransport::new();
    transport.respond("createTable", true);
    let mut client = client_with(transport);

    let mut field = InteractType::with_wire_type("Field");
    field.register("field_name", "CITY_");
    field.register("field_type", "STR500");
    assert!(client.create_table(&list(), &[field]).unwrap());

    let args = client.transport().last_args("createTable").unwrap();
    assert_eq!(
        args[1],
        WireValue::from(vec![
            WireStruct::new("Field")
                .with("fieldName", "CITY_")
                .with("fieldType", "STR500")
        ])
    );
}

#[test]
fn create_table_with_pk_sends_keys() {
    let mut transport = MockTransport::new();
    transport.respond("createTableWithPK", true);
    let mut client = client_with(transport);

    client
        .create_table_with_pk(&list(), &[], &["ID_"])
        .unwrap();
    let args = client.transport().last_args("createTableWithPK").unwrap();
    assert_eq!(args[2], WireValue::from(vec!["ID_"]));
}

#[test]
fn table_operation_expects_bool() {
    let mut client = client();
    let err = client.delete_table(&list()).unwrap_err();
    assert_eq!(
        err,
        InteractError::UnexpectedResponse {
            method: "deleteTable".into(),
            expected: "bool",
            found: WireValue::Null.kind(),
        }
    );
}

#[test]
fn table_fault_surfaces_from_operation() {
    let mut transport = MockTransport::new();
    transport.fault("truncateTable", Fault::new("TableFault", "no such table"));
    let mut client = client_with(transport);

    let err = client.truncate_table(&list()).unwrap_err();
    assert_eq!(
        err,
        InteractError::TableFault {
            detail: "no such table".into()
        }
    );
}

#[test]
fn delete_table_records_wraps_results() {
    let mut transport = MockTransport::new();
    transport.respond("deleteTableRecords", vec![delete_result("1"), delete_result("2")]);
    let mut client = client_with(transport);

    let results = client
        .delete_table_records(&list(), QueryColumn::CustomerId, &["1", "2"])
        .unwrap();
    assert_eq!(results.len(), 2);
}

#[test]
fn merge_table_records_reports_failed_rows() {
    let mut transport = MockTransport::new();
    transport.respond(
        "mergeTableRecords",
        WireStruct::new("MergeResult")
            .with("insertCount", 0i64)
            .with("updateCount", 0i64)
            .with("rejectedCount", 2i64)
            .with("totalCount", 2i64)
            .with("errorMessage", "Record 0 = bad email. Record 1 = bad email."),
    );
    let mut client = client_with(transport);

    let result = client
        .merge_table_records(&list(), &records(), &["EMAIL_ADDRESS_"])
        .unwrap();
    assert_eq!(
        result.failed(),
        vec![FailedRecord::Index(0), FailedRecord::Index(1)]
    );
}

#[test]
fn merge_table_records_with_pk_argument_wire_form() {
    let mut transport = MockTransport::new();
    transport.respond("mergeTableRecordsWithPK", merge_result());
    let mut client = client_with(transport);

    client
        .merge_table_records_with_pk(&list(), &records(), false, UpdateOnMatch::NoUpdate)
        .unwrap();
    let args = client.transport().last_args("mergeTableRecordsWithPK").unwrap();
    assert_eq!(args[2], WireValue::Bool(false));
    assert_eq!(args[3], WireValue::from("NO_UPDATE"));
}

#[test]
fn retrieve_table_records_reads_result_directly() {
    let mut transport = MockTransport::new();
    transport.respond("retrieveTableRecords", record_data_wire());
    let mut client = client_with(transport);

    let data = client
        .retrieve_table_records(&list(), QueryColumn::Riid, &["CITY_"], &["42"])
        .unwrap();
    assert_eq!(data.len(), 1);
}

// ── Profile extensions ──────────────────────────────────────────

#[test]
fn retrieve_profile_extension_records() {
    let mut transport = MockTransport::new();
    transport.respond("retrieveProfileExtensionRecords", record_data_wire());
    let mut client = client_with(transport);

    let data = client
        .retrieve_profile_extension_records(&list(), QueryColumn::Riid, &["CITY_"], &["42"])
        .unwrap();
    assert_eq!(data.field_names(), ["RIID_", "CITY_"]);
}

#[test]
fn delete_profile_extension_members() {
    let mut transport = MockTransport::new();
    transport.respond("deleteProfileExtensionMembers", delete_result("42"));
    let mut client = client_with(transport);

    let results = client
        .delete_profile_extension_members(&list(), QueryColumn::Riid, &["42"])
        .unwrap();
    assert_eq!(results.len(), 1);
}

#[test]
fn merge_into_profile_extension_wraps_recipient_results() {
    let mut transport = MockTransport::new();
    transport.respond(
        "mergeIntoProfileExtension",
        vec![
            WireStruct::new("RecipientResult").with("recipientId", 1i64),
            WireStruct::new("RecipientResult").with("errorMessage", "no match"),
        ],
    );
    let mut client = client_with(transport);

    let results = client
        .merge_into_profile_extension(
            &list(),
            &records(),
            QueryColumn::EmailAddress,
            true,
            UpdateOnMatch::ReplaceAll,
        )
        .unwrap();
    assert_eq!(results[0].recipient_id, Some(1));
    assert_eq!(results[1].error_message.as_deref(), Some("no match"));

    let args = client
        .transport()
        .last_args("mergeIntoProfileExtension")
        .unwrap();
    assert_eq!(args[2], WireValue::from("EMAIL_ADDRESS"));
    assert_eq!(args[4], WireValue::from("REPLACE_ALL"));
}

// ── Campaigns and folders ───────────────────────────────────────

#[test]
fn trigger_custom_event_sends_recipients() {
    let mut transport = MockTransport::new();
    transport.respond(
        "triggerCustomEvent",
        WireStruct::new("TriggerResult")
            .with("recipientId", 7i64)
            .with("success", true),
    );
    let mut client = client_with(transport);

    let recipient = Recipient::builder(list())
        .email_address("a@example.com")
        .build()
        .unwrap();
    let results = client
        .trigger_custom_event(&CustomEvent::named("welcome"), &[RecipientData::from(recipient)])
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].recipient_id, Some(7));

    let args = client.transport().last_args("triggerCustomEvent").unwrap();
    let event = args[0].as_struct().unwrap();
    assert_eq!(event.get("eventName"), Some(&WireValue::from("welcome")));
    let recipients = args[1].as_list().unwrap();
    assert_eq!(recipients.len(), 1);
    assert_eq!(
        recipients[0].as_struct().map(WireStruct::type_name),
        Some("RecipientData")
    );
}

#[test]
fn list_folders_handles_empty_answer() {
    let mut client = client();
    assert!(client.list_folders().unwrap().is_empty());
}

#[test]
fn list_folders_wraps_folders() {
    let mut transport = MockTransport::new();
    transport.respond(
        "listFolders",
        vec![
            WireStruct::new("FolderResult").with("name", "a"),
            WireStruct::new("FolderResult").with("name", "b"),
        ],
    );
    let mut client = client_with(transport);

    let names: Vec<String> = client
        .list_folders()
        .unwrap()
        .into_iter()
        .map(|f| f.name)
        .collect();
    assert_eq!(names, ["a", "b"]);
}

use sqlmask_core::keywords::is_keyword;
use sqlmask_core::lexer::{is_identifier, word_runs};
use sqlmask_core::{AliasMapping, Role, mask, unmask};

const STATEMENTS: &[&str] = &[
    "SELECT u.NAME FROM HR_ADMIN.TB_USER u WHERE u.ID = 1",
    "SELECT USER_ID, USER FROM TB_USER",
    "SELECT e.EMP_NO, d.DEPT_NAME\n  FROM HR.EMPLOYEES e\n  JOIN HR.DEPARTMENTS d ON d.DEPT_ID = e.DEPT_ID\n WHERE e.HIRE_DT > SYSDATE - 30",
    "SELECT /*+ INDEX(o ORD_IDX) */ o.ORDER_ID, SUM(o.AMOUNT) FROM SALES.ORDERS o GROUP BY o.ORDER_ID HAVING SUM(o.AMOUNT) > 100",
    "UPDATE APP.ACCOUNTS SET BALANCE = BALANCE - 10 WHERE ACCOUNT_ID = 42 AND STATUS = 'OPEN'",
    "INSERT INTO APP.AUDIT_LOG (LOG_ID, MESSAGE) VALUES (APP.SEQ_LOG.NEXTVAL, 'it''s done')",
    "MERGE INTO TGT.CUSTOMERS t USING STG.CUSTOMERS s ON (t.CUST_ID = s.CUST_ID)\nWHEN MATCHED THEN UPDATE SET t.EMAIL = s.EMAIL\nWHEN NOT MATCHED THEN INSERT (CUST_ID, EMAIL) VALUES (s.CUST_ID, s.EMAIL)",
    "BEGIN\n  FOR r IN (SELECT c.CODE FROM REF.CODES c) LOOP\n    DBMS_OUTPUT.PUT_LINE(r.CODE); -- print\n  END LOOP;\nEND;",
    "SELECT ORG.DEPT.MANAGER_ID, ORG.DEPT.DEPT_NAME FROM ORG.DEPT",
    "select lower_case.col_a from my_schema.lower_case",
];

fn live_identifiers(text: &str) -> Vec<&str> {
    word_runs(text)
        .filter(|run| run.is_identifier())
        .map(|run| run.text)
        .collect()
}

#[test]
fn test_round_trip() {
    for sql in STATEMENTS {
        let result = mask(sql);
        assert_eq!(&unmask(&result.masked, &result.mapping), sql, "{sql}");
    }
}

#[test]
fn test_mapping_is_injective() {
    for sql in STATEMENTS {
        let result = mask(sql);
        let mut aliases: Vec<_> = result.mapping.iter().map(|(a, _)| a).collect();
        let mut originals: Vec<_> = result.mapping.iter().map(|(_, o)| o).collect();
        let total = aliases.len();

        aliases.sort();
        aliases.dedup();
        originals.sort();
        originals.dedup();

        assert_eq!(aliases.len(), total, "{sql}");
        assert_eq!(originals.len(), total, "{sql}");
    }
}

#[test]
fn test_no_keyword_is_ever_masked() {
    for sql in STATEMENTS {
        let result = mask(sql);
        for (_, original) in result.mapping.iter() {
            assert!(!is_keyword(original), "{original} masked in {sql}");
        }
    }
}

#[test]
fn test_every_alias_is_well_formed() {
    for sql in STATEMENTS {
        for (alias, _) in mask(sql).mapping.iter() {
            assert!(is_identifier(alias));
            assert!(Role::from_alias(alias).is_some(), "{alias}");
        }
    }
}

#[test]
fn test_literal_and_comment_inertness() {
    let sql = "SELECT a FROM t WHERE note = 'ONLY_IN_LITERAL' -- HIDDEN_NAME";
    let result = mask(sql);

    assert!(result.mapping.alias_for("ONLY_IN_LITERAL").is_none());
    assert!(result.mapping.alias_for("HIDDEN_NAME").is_none());
    assert!(result.masked.contains("'ONLY_IN_LITERAL'"));
    assert!(result.masked.ends_with("-- HIDDEN_NAME"));
}

#[test]
fn test_literal_glued_to_identifier_survives() {
    for sql in [
        "SELECT NAME FROM HR.T WHERE NAME = N'secret'",
        "SELECT q'[it is]' FROM DUAL",
        "SELECT a/*note*/b FROM t",
        "SELECT x--tail",
    ] {
        let result = mask(sql);
        assert_eq!(unmask(&result.masked, &result.mapping), sql, "{sql}");
        for (_, original) in result.mapping.iter() {
            assert!(is_identifier(original), "{original} in {sql}");
            assert!(live_identifiers(sql).contains(&original), "{original} in {sql}");
        }
    }

    let result = mask("SELECT NAME FROM HR.T WHERE NAME = N'secret'");
    let n = result.mapping.alias_for("N").unwrap();
    assert!(result.masked.ends_with(&format!("= {n}'secret'")));

    let result = mask("SELECT a/*note*/b FROM t");
    assert!(result.masked.contains("/*note*/"));
    assert!(result.mapping.alias_for("a").is_some());
    assert!(result.mapping.alias_for("b").is_some());
}

#[test]
fn test_placeholder_alphabet_in_input_round_trips() {
    let sql = "SELECT \u{E000}0\u{E003}, 'x' FROM DUAL";
    let result = mask(sql);

    assert_eq!(result.masked, sql);
    assert!(result.mapping.is_empty());
}

#[test]
fn test_name_in_comment_leaks_even_when_masked_elsewhere() {
    let sql = "SELECT SALARY FROM PAY.T -- SALARY is sensitive";
    let result = mask(sql);

    let alias = result.mapping.alias_for("SALARY").unwrap();
    assert!(result.masked.starts_with(&format!("SELECT {alias} ")));
    assert!(result.masked.ends_with("-- SALARY is sensitive"));
}

#[test]
fn test_keywords_literals_and_numbers_only() {
    let sql = "SELECT 1, 2.5, 'x' FROM DUAL WHERE 3 > 2 -- nothing here";
    let result = mask(sql);

    assert_eq!(result.masked, sql);
    assert!(result.mapping.is_empty());
}

#[test]
fn test_boundary_safety() {
    let result = mask("SELECT USER_ID, USER FROM TB_USER");

    let user_id = result.mapping.alias_for("USER_ID").unwrap();
    let user = result.mapping.alias_for("USER").unwrap();
    assert_ne!(user_id, user);
    assert_eq!(result.masked, "SELECT COL_001, COL_003 FROM COL_002");
    assert_eq!(
        unmask(&result.masked, &result.mapping),
        "SELECT USER_ID, USER FROM TB_USER"
    );
}

#[test]
fn test_masked_text_uses_only_aliases_and_keywords() {
    let result = mask("SELECT u.NAME FROM HR_ADMIN.TB_USER u WHERE u.ID = 1");

    for word in live_identifiers(&result.masked) {
        assert!(
            is_keyword(word) || result.mapping.original_for(word).is_some(),
            "{word} leaked"
        );
    }
    assert_eq!(result.mapping.alias_for("u"), Some("ALS_001"));
    assert_eq!(result.mapping.alias_for("HR_ADMIN"), Some("SCH_001"));
    assert_eq!(result.mapping.alias_for("TB_USER"), Some("TBL_001"));
}

#[test]
fn test_restore_after_external_edit() {
    let sql = "SELECT e.EMP_NO, d.DEPT_NAME FROM HR.EMPLOYEES e JOIN HR.DEPARTMENTS d ON d.DEPT_ID = e.DEPT_ID";
    let result = mask(sql);

    // Reflow the masked text and append a clause, keeping alias tokens intact
    let edited = format!(
        "{}\nORDER BY 2 DESC\nFETCH FIRST 10 ROWS ONLY",
        result.masked.replace(" JOIN ", "\n  JOIN ").replace(", ", ",\n       ")
    );
    let restored = unmask(&edited, &result.mapping);

    assert_eq!(
        restored,
        "SELECT e.EMP_NO,\n       d.DEPT_NAME FROM HR.EMPLOYEES e\n  JOIN HR.DEPARTMENTS d ON d.DEPT_ID = e.DEPT_ID\nORDER BY 2 DESC\nFETCH FIRST 10 ROWS ONLY"
    );
}

#[test]
fn test_restore_with_deserialized_mapping() {
    let sql = "SELECT c.CODE FROM REF.CODES c";
    let result = mask(sql);

    let json = serde_json::to_string(&result.mapping).unwrap();
    let stored: AliasMapping = serde_json::from_str(&json).unwrap();

    assert_eq!(unmask(&result.masked, &stored), sql);
}

#[test]
fn test_masking_is_deterministic_across_threads() {
    let expected: Vec<_> = STATEMENTS.iter().map(|sql| mask(sql)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| STATEMENTS.iter().map(|sql| mask(sql)).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

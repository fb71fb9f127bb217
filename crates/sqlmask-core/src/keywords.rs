//! Oracle SQL / PL/SQL vocabulary that is never treated as an identifier

use lazy_static::lazy_static;
use std::collections::HashSet;

const KEYWORD_LIST: &[&str] = &[
    // DML, clauses and operators
    "SELECT", "FROM", "WHERE", "AND", "OR", "NOT", "IN", "EXISTS", "BETWEEN", "LIKE", "IS",
    "NULL", "AS", "ON", "JOIN", "INNER", "LEFT", "RIGHT", "OUTER", "FULL", "CROSS", "NATURAL",
    "USING", "ORDER", "BY", "GROUP", "HAVING", "UNION", "ALL", "INTERSECT", "MINUS", "EXCEPT",
    "INSERT", "INTO", "VALUES", "UPDATE", "SET", "DELETE", "MERGE", "MATCHED", "SOURCE",
    "TARGET", "PIVOT", "UNPIVOT", "WITH", "RECURSIVE", "DISTINCT", "UNIQUE", "ASC", "DESC",
    "NULLS", "FIRST", "LAST", "LIMIT", "OFFSET", "ESCAPE", "ANY", "SOME", "SIBLINGS",
    // DDL
    "CREATE", "ALTER", "DROP", "TABLE", "VIEW", "INDEX", "SEQUENCE", "TRIGGER", "PROCEDURE",
    "FUNCTION", "PACKAGE", "PRIMARY", "KEY", "FOREIGN", "REFERENCES", "CONSTRAINT", "CHECK",
    "DEFAULT", "GRANT", "REVOKE", "MATERIALIZED", "SYNONYM", "PUBLIC", "REPLACE", "FORCE",
    "NOFORCE", "EDITIONABLE", "NONEDITIONABLE", "SHARING", "METADATA", "DATA", "NONE", "OBJECT",
    "UNDER", "STORAGE", "TABLESPACE", "LOGGING", "NOLOGGING", "COMPRESS", "NOCOMPRESS",
    "PARALLEL", "NOPARALLEL", "CACHE", "NOCACHE", "ENABLE", "DISABLE", "VALIDATE",
    "NOVALIDATE", "RELY", "NORELY", "IMMEDIATE", "DEFERRED", "INITIALLY", "DEFERRABLE",
    "BITMAP", "GLOBAL", "TEMPORARY", "PRESERVE", "TRUNCATE", "ANALYZE", "COMPUTE", "ESTIMATE",
    "STATISTICS", "EXPLAIN", "PLAN",
    // Transactions
    "COMMIT", "ROLLBACK", "SAVEPOINT",
    // Pseudo-columns and hierarchy
    "ROWNUM", "ROWID", "SYSDATE", "SYSTIMESTAMP", "DUAL", "LEVEL", "CONNECT", "START", "PRIOR",
    "NOCYCLE", "NEXTVAL", "CURRVAL",
    // Built-in functions
    "COUNT", "SUM", "AVG", "MIN", "MAX", "NVL", "NVL2", "DECODE", "TO_CHAR", "TO_DATE",
    "TO_NUMBER", "SUBSTR", "INSTR", "LENGTH", "TRIM", "LTRIM", "RTRIM", "UPPER", "LOWER",
    "LPAD", "RPAD", "ROUND", "TRUNC", "MOD", "ABS", "CEIL", "FLOOR", "COALESCE", "GREATEST",
    "LEAST", "CAST", "EXTRACT", "XMLAGG", "XMLELEMENT", "XMLFOREST", "XMLTYPE", "LISTAGG",
    // Analytic functions and windowing
    "OVER", "PARTITION", "ROW_NUMBER", "RANK", "DENSE_RANK", "LAG", "LEAD", "WITHIN",
    "RESPECT", "IGNORE", "ROWS", "RANGE", "UNBOUNDED", "PRECEDING", "FOLLOWING", "CURRENT",
    "ROW",
    // Control flow and PL/SQL blocks
    "CASE", "WHEN", "THEN", "ELSE", "ELSIF", "END", "IF", "BEGIN", "DECLARE", "LOOP", "WHILE",
    "FOR", "EXIT", "RETURN", "CURSOR", "OPEN", "FETCH", "CLOSE", "EXCEPTION", "RAISE",
    "PRAGMA", "AUTONOMOUS_TRANSACTION", "BULK", "COLLECT", "FORALL", "SAVE", "EXCEPTIONS",
    "SQL", "SQLERRM", "SQLCODE", "FOUND", "NOTFOUND", "ISOPEN", "ROWCOUNT", "TYPE", "RECORD",
    "VARRAY", "NESTED", "OF", "REF", "OUT", "NOCOPY", "DETERMINISTIC", "PIPELINED",
    "PARALLEL_ENABLE", "RESULT_CACHE", "RELIES_ON", "OTHERS", "NO_DATA_FOUND",
    "TOO_MANY_ROWS", "DUP_VAL_ON_INDEX",
    // Supplied packages
    "DBMS_OUTPUT", "PUT_LINE", "UTL_FILE", "DBMS_LOB",
    // Data types
    "VARCHAR2", "NUMBER", "INTEGER", "DATE", "TIMESTAMP", "CLOB", "BLOB", "CHAR", "NVARCHAR2",
    "NCHAR", "FLOAT", "BINARY_FLOAT", "BINARY_DOUBLE", "RAW", "LONG", "BOOLEAN",
    "PLS_INTEGER",
    // Optimizer hints
    "GATHER_PLAN_STATISTICS", "MONITOR", "NO_MONITOR", "HINT", "APPEND", "LEADING", "USE_NL",
    "USE_HASH", "USE_MERGE", "ORDERED", "FIRST_ROWS", "ALL_ROWS", "RULE", "CHOOSE",
    "INDEX_FFS", "INDEX_SS", "NO_INDEX", "HASH_AJ", "MERGE_AJ", "NL_AJ", "HASH_SJ", "MERGE_SJ",
    "NL_SJ", "PUSH_SUBQ", "NO_PUSH_SUBQ", "PUSH_PRED", "NO_PUSH_PRED", "UNNEST", "NO_UNNEST",
    "MATERIALIZE", "INLINE", "QB_NAME", "CARDINALITY", "OPT_PARAM", "DYNAMIC_SAMPLING",
    "NO_RESULT_CACHE",
];

lazy_static! {
    static ref KEYWORDS: HashSet<&'static str> = KEYWORD_LIST.iter().copied().collect();
}

/// Case-insensitive membership test against the reserved vocabulary.
pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(word.to_ascii_uppercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_case_insensitive() {
        assert!(is_keyword("SELECT"));
        assert!(is_keyword("select"));
        assert!(is_keyword("Dbms_Output"));
        assert!(is_keyword("no_unnest"));
    }

    #[test]
    fn test_common_names_are_not_keywords() {
        assert!(!is_keyword("USER"));
        assert!(!is_keyword("NAME"));
        assert!(!is_keyword("ID"));
        assert!(!is_keyword("TB_USER"));
    }

    #[test]
    fn test_keyword_list_has_no_lowercase_entries() {
        assert!(KEYWORD_LIST.iter().all(|k| k.to_ascii_uppercase() == *k));
    }
}

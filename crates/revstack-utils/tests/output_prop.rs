use proptest::prelude::*;
use revstack_utils::output::split_lines;

fn line() -> impl Strategy<Value = String> {
    "[0-9a-f ]{0,20}"
}

proptest! {
    #[test]
    fn joined_lines_split_back(lines in prop::collection::vec(line(), 0..10)) {
        let mut stdout = String::new();
        for l in &lines {
            stdout.push_str(l);
            stdout.push('\n');
        }
        prop_assert_eq!(split_lines(stdout.as_bytes()), lines);
    }

    #[test]
    fn crlf_matches_lf(lines in prop::collection::vec(line(), 1..10)) {
        let lf = lines.join("\n");
        let crlf = lines.join("\r\n");
        prop_assert_eq!(split_lines(lf.as_bytes()), split_lines(crlf.as_bytes()));
    }

    #[test]
    fn arbitrary_bytes_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let lines = split_lines(&bytes);
        prop_assert!(lines.iter().all(|l| !l.contains('\n')));
    }
}

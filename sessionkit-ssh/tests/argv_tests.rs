use sessionkit_ssh::{SshCommandInfo, classify_command_line, classify_ssh_args};

#[test]
fn test_user_at_host() {
    let info = classify_ssh_args(&["ssh", "someone@somehost"]);
    assert_eq!(info.user, "someone");
    assert_eq!(info.host, "somehost");
    assert_eq!(info.command, "");
}

#[test]
fn test_user_flag() {
    let info = classify_ssh_args(&["ssh", "-l", "someone", "somehost"]);
    assert_eq!(info.user, "someone");
    assert_eq!(info.host, "somehost");
    assert_eq!(info.command, "");
}

#[test]
fn test_boolean_flags() {
    let info = classify_ssh_args(&["ssh", "-4", "-X", "somehost"]);
    assert_eq!(info.user, "");
    assert_eq!(info.host, "somehost");
    assert_eq!(info.command, "");
}

#[test]
fn test_port_and_command() {
    let info = classify_ssh_args(&["ssh", "-p", "443", "somehost", "ps"]);
    assert_eq!(info.user, "");
    assert_eq!(info.host, "somehost");
    assert_eq!(info.port, "443");
    assert_eq!(info.command, "ps");
}

#[test]
fn test_attached_arguments() {
    let info = classify_ssh_args(&["ssh", "-D1080", "-oControlMaster=no", "somehost"]);
    assert_eq!(info.user, "");
    assert_eq!(info.host, "somehost");
}

#[test]
fn test_command_with_arguments() {
    let info = classify_ssh_args(&["ssh", "-t", "someone@somehost", "screen", "-r", "testscreen"]);
    assert_eq!(info.user, "someone");
    assert_eq!(info.host, "somehost");
    assert_eq!(info.command, "screen -r testscreen");
}

#[test]
fn test_fields_map() {
    let info = classify_ssh_args(&["ssh", "-p", "22", "me@box"]);
    let fields = info.fields();
    assert_eq!(fields["user"], "me");
    assert_eq!(fields["host"], "box");
    assert_eq!(fields["port"], "22");
    assert_eq!(fields["command"], "");
}

#[test]
fn test_classify_quoted_command_line() {
    let info = classify_command_line("ssh -o 'ProxyJump=bastion' deploy@web.example.com 'tail -f log'")
        .expect("line should split");
    assert_eq!(info.user, "deploy");
    assert_eq!(info.host, "web.example.com");
    assert_eq!(info.command, "tail -f log");

    assert_eq!(classify_command_line(""), None);
    assert_eq!(classify_command_line("ssh 'unbalanced"), None);
}

#[test]
fn test_remote_title_format() {
    let info = classify_ssh_args(&["ssh", "someone@build.example.com", "top"]);
    assert_eq!(info.format("(%u) %H"), "(someone) build.example.com");
    assert_eq!(info.format("%U%h: %c"), "someone@build: top");

    let anonymous = SshCommandInfo {
        host: "10.0.0.5".to_string(),
        ..Default::default()
    };
    assert_eq!(anonymous.format("%U%h"), "10.0.0.5");
}

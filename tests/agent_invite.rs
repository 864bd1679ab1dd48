//! Agent provisioning: invitation, roster management, and the cleanup
//! behavior when an agent leaves.

mod fixtures;

use fixtures::crm::{crm, invited_agent, organisor};
use fixtures::identity::{agent_draft, lead_draft};
use prospect_rs::{AgentDraft, Error, InvitationToken, Principal};

#[test]
fn invite_binds_agent_to_the_organisors_organisation() {
    let (mut crm, notifier) = crm();
    let boss = organisor(&mut crm, 1);

    let invitation = crm.invite_agent(&boss, agent_draft(10)).unwrap();
    let agent = crm.get_agent(&boss, invitation.agent).unwrap();
    assert_eq!(Some(agent.organisation()), boss.organisation());
    assert_eq!(agent.user(), &invitation.user);

    // The invitee was notified, best-effort.
    let sent = notifier.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "You are invited to be an agent");
    assert_eq!(sent[0].recipients, vec!["agent10@example.org"]);

    // The resolved link points back at the new record.
    let link = crm.agent_link_for(&invitation.user).unwrap();
    assert_eq!(link.agent, invitation.agent);
    assert_eq!(Some(link.organisation), boss.organisation());
}

#[test]
fn invitation_token_is_high_entropy_and_single_use_material() {
    let (mut crm, _) = crm();
    let boss = organisor(&mut crm, 1);

    let first = crm.invite_agent(&boss, agent_draft(10)).unwrap();
    let second = crm.invite_agent(&boss, agent_draft(11)).unwrap();

    for invitation in [&first, &second] {
        assert_eq!(invitation.token.as_str().len(), InvitationToken::LEN);
        assert!(invitation
            .token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_alphanumeric()));
    }
    assert_ne!(first.token.as_str(), second.token.as_str());
}

#[test]
fn agents_cannot_invite_or_list_the_roster() {
    let (mut crm, _) = crm();
    let boss = organisor(&mut crm, 1);
    let agent = invited_agent(&mut crm, &boss, 10);

    assert!(matches!(
        crm.invite_agent(&agent, agent_draft(11)),
        Err(Error::Forbidden)
    ));
    assert!(matches!(crm.list_agents(&agent), Err(Error::Forbidden)));
}

#[test]
fn invalid_invitee_email_aborts_without_provisioning() {
    let (mut crm, notifier) = crm();
    let boss = organisor(&mut crm, 1);

    let err = crm
        .invite_agent(
            &boss,
            AgentDraft {
                email: "not-an-address".to_string(),
                first_name: "Grace".to_string(),
                last_name: "Hopper".to_string(),
            },
        )
        .unwrap_err();
    assert!(matches!(err, Error::Invalid(_)));
    assert!(crm.list_agents(&boss).unwrap().is_empty());
    assert!(notifier.sent().is_empty());
}

#[test]
fn roster_is_limited_to_the_organisors_own_organisation() {
    let (mut crm, _) = crm();
    let u1 = organisor(&mut crm, 1);
    let u3 = organisor(&mut crm, 3);
    let _mine = invited_agent(&mut crm, &u1, 10);
    let _theirs = invited_agent(&mut crm, &u3, 11);

    let roster = crm.list_agents(&u1).unwrap();
    assert_eq!(roster.len(), 1);
    assert_eq!(Some(roster[0].organisation()), u1.organisation());

    // Cross-tenant agent reads are indistinguishable from absence.
    let theirs_id = crm.list_agents(&u3).unwrap()[0].id();
    assert!(matches!(crm.get_agent(&u1, theirs_id), Err(Error::NotFound)));
}

#[test]
fn agent_contact_details_can_be_updated() {
    let (mut crm, _) = crm();
    let boss = organisor(&mut crm, 1);
    let invitation = crm.invite_agent(&boss, agent_draft(10)).unwrap();

    crm.update_agent(
        &boss,
        invitation.agent,
        AgentDraft {
            email: "renamed@example.org".to_string(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
        },
    )
    .unwrap();

    let agent = crm.get_agent(&boss, invitation.agent).unwrap();
    assert_eq!(agent.email.as_str(), "renamed@example.org");
    // The user binding never changes.
    assert_eq!(agent.user(), &invitation.user);
}

#[test]
fn removing_an_agent_reverts_their_leads_to_unassigned() {
    let (mut crm, _) = crm();
    let boss = organisor(&mut crm, 1);
    let agent = invited_agent(&mut crm, &boss, 10);
    let lead = crm.create_lead(&boss, lead_draft("Ada", "Lovelace", 36)).unwrap();

    let agent_id = match &agent {
        Principal::Agent {
            link: Some(link), ..
        } => link.agent,
        _ => unreachable!(),
    };
    crm.assign_agent(&boss, lead, agent_id).unwrap();
    crm.remove_agent(&boss, agent_id).unwrap();

    assert!(crm.get_lead(&boss, lead).unwrap().assignment.is_none());
    assert!(crm.list_agents(&boss).unwrap().is_empty());
    // The departed agent's principal resolves no link anymore.
    assert!(crm.agent_link_for(agent.user()).is_none());
}

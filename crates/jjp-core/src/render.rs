//! XML bodies posted to the server.
//!
//! The provisioners treat rendered documents as opaque bytes, so any
//! renderer producing a config the server accepts can be substituted. These
//! are the defaults: the CloudBees folder stub and a pipeline-from-SCM job.

use crate::jobspec::JobSpec;

/// Escapes text for embedding in XML element content or attribute values.
fn xml_escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Minimal folder definition understood by the CloudBees Folders plugin.
pub fn render_folder(description: &str) -> String {
    format!(
        "<com.cloudbees.hudson.plugins.folder.Folder plugin=\"cloudbees-folder\">\n  \
         <description>{}</description>\n\
         </com.cloudbees.hudson.plugins.folder.Folder>\n",
        xml_escape(description)
    )
}

/// Pipeline job definition: Git SCM checkout plus a Jenkinsfile path,
/// lightweight checkout enabled.
pub fn render_pipeline_job(spec: &JobSpec) -> String {
    format!(
        r#"<flow-definition plugin="workflow-job">
  <description>{description}</description>
  <keepDependencies>false</keepDependencies>
  <properties/>
  <definition class="org.jenkinsci.plugins.workflow.cps.CpsScmFlowDefinition" plugin="workflow-cps">
    <scm class="hudson.plugins.git.GitSCM" plugin="git">
      <configVersion>2</configVersion>
      <userRemoteConfigs>
        <hudson.plugins.git.UserRemoteConfig>
          <url>{git_url}</url>
          <credentialsId>{credentials_id}</credentialsId>
        </hudson.plugins.git.UserRemoteConfig>
      </userRemoteConfigs>
      <branches>
        <hudson.plugins.git.BranchSpec>
          <name>{branch}</name>
        </hudson.plugins.git.BranchSpec>
      </branches>
      <doGenerateSubmoduleConfigurations>false</doGenerateSubmoduleConfigurations>
      <submoduleCfg class="empty-list"/>
      <extensions/>
    </scm>
    <scriptPath>{jenkinsfile}</scriptPath>
    <lightweight>true</lightweight>
  </definition>
  <triggers/>
  <disabled>false</disabled>
</flow-definition>
"#,
        description = xml_escape(&spec.description),
        git_url = xml_escape(&spec.git_url),
        credentials_id = xml_escape(&spec.credentials_id),
        branch = xml_escape(&spec.branch),
        jenkinsfile = xml_escape(&spec.jenkinsfile),
    )
}
